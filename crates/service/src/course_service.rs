use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::course;
use crate::errors::ServiceError;

/// Read access to courses.
#[derive(Clone)]
pub struct CourseInterface {
    db: DatabaseConnection,
}

impl CourseInterface {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// All courses, ordered by id.
    pub async fn get_all_courses(&self) -> Result<Vec<course::Model>, ServiceError> {
        let courses = course::Entity::find().order_by_asc(course::Column::Id).all(&self.db).await?;
        Ok(courses)
    }

    /// Get a course by id.
    pub async fn get_course_by_id(&self, id: i32) -> Result<Option<course::Model>, ServiceError> {
        Ok(course::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Get a course by its exact name.
    pub async fn get_course_by_name(&self, name: &str) -> Result<Option<course::Model>, ServiceError> {
        let found = course::Entity::find().filter(course::Column::Name.eq(name)).one(&self.db).await?;
        Ok(found)
    }
}
