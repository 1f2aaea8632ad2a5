use std::sync::Arc;

use handlebars::Handlebars;
use sea_orm::DatabaseConnection;

use service::{CourseInterface, GroupInterface, StudentInterface};

use crate::errors::StartupError;
use crate::views;

/// Shared by every handler; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub groups: GroupInterface,
    pub students: StudentInterface,
    pub courses: CourseInterface,
    pub views: Arc<Handlebars<'static>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Result<Self, StartupError> {
        let views = Arc::new(views::registry()?);
        Ok(Self {
            groups: GroupInterface::new(db.clone()),
            students: StudentInterface::new(db.clone()),
            courses: CourseInterface::new(db),
            views,
        })
    }
}
