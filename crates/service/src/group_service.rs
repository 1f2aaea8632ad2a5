use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    ColumnTrait,
};

use models::{group, student};
use crate::errors::ServiceError;

/// Read access to groups.
#[derive(Clone)]
pub struct GroupInterface {
    db: DatabaseConnection,
}

impl GroupInterface {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// All groups, ordered by id.
    pub async fn get_all_groups(&self) -> Result<Vec<group::Model>, ServiceError> {
        let groups = group::Entity::find().order_by_asc(group::Column::Id).all(&self.db).await?;
        Ok(groups)
    }

    /// Get a group by id.
    pub async fn get_group_by_id(&self, id: i32) -> Result<Option<group::Model>, ServiceError> {
        Ok(group::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Groups having at most `students_count` students.
    ///
    /// Groups are inner-joined with their students, so a group without any
    /// student never appears, whatever the threshold.
    pub async fn get_group_with_less_students_count(&self, students_count: i64) -> Result<Vec<group::Model>, ServiceError> {
        let groups = group::Entity::find()
            .join(JoinType::InnerJoin, group::Relation::Student.def())
            .group_by(group::Column::Id)
            .group_by(group::Column::Name)
            .having(Expr::expr(Func::count(Expr::col((student::Entity, student::Column::Id)))).lte(students_count))
            .order_by_asc(group::Column::Id)
            .all(&self.db)
            .await?;
        Ok(groups)
    }

    pub async fn check_if_group_exists(&self, id: i32) -> Result<bool, ServiceError> {
        let count = group::Entity::find().filter(group::Column::Id.eq(id)).count(&self.db).await?;
        Ok(count > 0)
    }
}
