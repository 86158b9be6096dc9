//! Repository for the interaction catalog.
//!
//! Write helpers take the connection as a parameter so the processing
//! pipeline can run them inside one transaction; reads go through the pool.
//! Get-or-create is an atomic insert-on-conflict returning the surviving row,
//! backed by the UNIQUE(name) constraints, so concurrent identical-name
//! inserts cannot produce duplicates.

use crate::db::entities::{article, compound, encode_list, interaction, model, plant, source};
use crate::errors::{AppError, Result};
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use serde::Serialize;

/// One interaction row with all joined display data.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct InteractionRecord {
    pub id: i64,
    pub plant_name: String,
    pub compound_name: Option<String>,
    pub effects: String,
    pub plant_parts: Option<String>,
    pub model_name: String,
    pub article_title: String,
    pub article_url: String,
}

/// One source row with the producing model joined.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct SourceRecord {
    pub id: i64,
    pub model_name: String,
    pub raw_response: Option<String>,
}

/// Case-insensitive substring filters, ANDed together. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct InteractionFilter {
    pub plant_name: Option<String>,
    pub compound_name: Option<String>,
    pub effect: Option<String>,
}

impl InteractionFilter {
    /// Normalize request parameters: blank strings mean "no filter".
    pub fn from_params(
        plant_name: Option<String>,
        compound_name: Option<String>,
        effect: Option<String>,
    ) -> Self {
        let clean = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            plant_name: clean(plant_name),
            compound_name: clean(compound_name),
            effect: clean(effect),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plant_name.is_none() && self.compound_name.is_none() && self.effect.is_none()
    }
}

/// Pagination result: items for the requested page plus global counts.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[derive(Clone)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        Ok(self.db.begin().await?)
    }

    // ========================================================================
    // Write path (callers supply the transaction)
    // ========================================================================

    /// Get or create the extraction-model row by name.
    pub async fn get_or_create_model<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        description: Option<&str>,
    ) -> Result<model::Model> {
        let row = model::Entity::insert(model::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.map(str::to_owned)),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(model::Column::Name)
                .update_column(model::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;
        Ok(row)
    }

    /// Get or create a plant row by exact name.
    pub async fn get_or_create_plant<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<plant::Model> {
        let row = plant::Entity::insert(plant::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(plant::Column::Name)
                .update_column(plant::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;
        Ok(row)
    }

    /// Get or create a compound row by exact name.
    pub async fn get_or_create_compound<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<compound::Model> {
        let row = compound::Entity::insert(compound::ActiveModel {
            name: Set(Some(name.to_owned())),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(compound::Column::Name)
                .update_column(compound::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;
        Ok(row)
    }

    pub async fn insert_article<C: ConnectionTrait>(
        &self,
        conn: &C,
        url: &str,
        title: &str,
        abstract_text: Option<&str>,
    ) -> Result<article::Model> {
        let row = article::ActiveModel {
            url: Set(url.to_owned()),
            title: Set(title.to_owned()),
            abstract_text: Set(abstract_text.map(str::to_owned)),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        Ok(row)
    }

    pub async fn insert_source<C: ConnectionTrait>(
        &self,
        conn: &C,
        article_id: i64,
        model_id: i64,
        raw_response: &str,
    ) -> Result<source::Model> {
        let row = source::ActiveModel {
            article_id: Set(article_id),
            model_id: Set(model_id),
            raw_response: Set(Some(raw_response.to_owned())),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        Ok(row)
    }

    pub async fn insert_interaction<C: ConnectionTrait>(
        &self,
        conn: &C,
        plant_id: i64,
        compound_id: i64,
        source_id: i64,
        effects: &[String],
        plant_parts: Option<&[String]>,
    ) -> Result<interaction::Model> {
        let row = interaction::ActiveModel {
            plant_id: Set(plant_id),
            compound_id: Set(compound_id),
            source_id: Set(source_id),
            effects: Set(encode_list(effects)),
            plant_parts: Set(plant_parts.map(encode_list)),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        Ok(row)
    }

    // ========================================================================
    // Read path
    // ========================================================================

    /// All articles, newest id first, paginated.
    pub async fn list_articles(&self, page: u64, size: u64) -> Result<Paged<article::Model>> {
        let paginator = article::Entity::find()
            .order_by_desc(article::Column::Id)
            .paginate(&self.db, size);

        let counts = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page).await?;

        Ok(Paged {
            items,
            total_elements: counts.number_of_items,
            total_pages: counts.number_of_pages,
        })
    }

    /// Interactions with joined plant/compound/source/model/article data,
    /// filtered and paginated, newest id first.
    pub async fn list_interactions(
        &self,
        filter: &InteractionFilter,
        page: u64,
        size: u64,
    ) -> Result<Paged<InteractionRecord>> {
        let paginator = Self::interaction_query(filter)
            .into_model::<InteractionRecord>()
            .paginate(&self.db, size);

        let counts = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page).await?;

        Ok(Paged {
            items,
            total_elements: counts.number_of_items,
            total_pages: counts.number_of_pages,
        })
    }

    /// The full filtered interaction set, for export.
    pub async fn all_interactions(
        &self,
        filter: &InteractionFilter,
    ) -> Result<Vec<InteractionRecord>> {
        let rows = Self::interaction_query(filter)
            .into_model::<InteractionRecord>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn sources_for_article(&self, article_id: i64) -> Result<Vec<SourceRecord>> {
        let rows = source::Entity::find()
            .join(JoinType::InnerJoin, source::Relation::Model.def())
            .filter(source::Column::ArticleId.eq(article_id))
            .select_only()
            .column(source::Column::Id)
            .column_as(model::Column::Name, "model_name")
            .column(source::Column::RawResponse)
            .order_by_asc(source::Column::Id)
            .into_model::<SourceRecord>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn source_by_id(&self, id: i64) -> Result<SourceRecord> {
        source::Entity::find_by_id(id)
            .join(JoinType::InnerJoin, source::Relation::Model.def())
            .select_only()
            .column(source::Column::Id)
            .column_as(model::Column::Name, "model_name")
            .column(source::Column::RawResponse)
            .into_model::<SourceRecord>()
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound { resource: "source", id })
    }

    fn interaction_query(filter: &InteractionFilter) -> sea_orm::Select<interaction::Entity> {
        let mut query = interaction::Entity::find()
            .join(JoinType::InnerJoin, interaction::Relation::Plant.def())
            .join(JoinType::InnerJoin, interaction::Relation::Compound.def())
            .join(JoinType::InnerJoin, interaction::Relation::Source.def())
            .join(JoinType::InnerJoin, source::Relation::Model.def())
            .join(JoinType::InnerJoin, source::Relation::Article.def())
            .select_only()
            .column(interaction::Column::Id)
            .column_as(plant::Column::Name, "plant_name")
            .column_as(compound::Column::Name, "compound_name")
            .column(interaction::Column::Effects)
            .column(interaction::Column::PlantParts)
            .column_as(model::Column::Name, "model_name")
            .column_as(article::Column::Title, "article_title")
            .column_as(article::Column::Url, "article_url")
            .order_by_desc(interaction::Column::Id);

        if let Some(ref plant_name) = filter.plant_name {
            query = query.filter(contains_ci((plant::Entity, plant::Column::Name), plant_name));
        }
        if let Some(ref compound_name) = filter.compound_name {
            query = query.filter(contains_ci(
                (compound::Entity, compound::Column::Name),
                compound_name,
            ));
        }
        if let Some(ref effect) = filter.effect {
            query = query.filter(contains_ci(
                (interaction::Entity, interaction::Column::Effects),
                effect,
            ));
        }

        query
    }
}

/// LOWER(col) LIKE '%value%'
fn contains_ci<T>(col: T, value: &str) -> sea_orm::sea_query::SimpleExpr
where
    T: sea_orm::sea_query::IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", value.to_lowercase()))
}
