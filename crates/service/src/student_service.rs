use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info};

use models::{course, course_student, group, student};
use crate::errors::ServiceError;

/// A student together with its courses, ordered by course id.
#[derive(Clone, Debug)]
pub struct StudentWithCourses {
    pub student: student::Model,
    pub courses: Vec<course::Model>,
}

/// A student with its group (if any) and courses.
#[derive(Clone, Debug)]
pub struct StudentFullInfo {
    pub student: student::Model,
    pub group: Option<group::Model>,
    pub courses: Vec<course::Model>,
}

/// Students and their course membership.
///
/// Every operation opens its own transaction on the pooled connection and
/// commits before returning. An error drops the transaction, which rolls it back.
#[derive(Clone)]
pub struct StudentInterface {
    db: DatabaseConnection,
}

async fn find_course<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Option<course::Model>, ServiceError> {
    let found = course::Entity::find().filter(course::Column::Name.eq(name)).one(conn).await?;
    Ok(found)
}

async fn courses_of<C: ConnectionTrait>(conn: &C, s: &student::Model) -> Result<Vec<course::Model>, ServiceError> {
    let courses = s.find_related(course::Entity).order_by_asc(course::Column::Id).all(conn).await?;
    Ok(courses)
}

/// Resolve both ends of a course link or report which one is missing.
async fn link_ends<C: ConnectionTrait>(
    conn: &C,
    student_id: i32,
    course_name: &str,
) -> Result<(student::Model, course::Model), ServiceError> {
    let s = student::Entity::find_by_id(student_id)
        .one(conn)
        .await?
        .ok_or(ServiceError::InvalidStudent(student_id))?;
    let c = find_course(conn, course_name)
        .await?
        .ok_or_else(|| ServiceError::InvalidCourse(course_name.to_string()))?;
    Ok((s, c))
}

impl StudentInterface {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// All students, ordered by id.
    pub async fn get_all_students(&self) -> Result<Vec<student::Model>, ServiceError> {
        let students = student::Entity::find().order_by_asc(student::Column::Id).all(&self.db).await?;
        Ok(students)
    }

    /// Get a student by id.
    pub async fn get_student_by_id(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Students enrolled in the course named `course_name`, each with its full course set.
    ///
    /// `None` when no course carries that name; an empty vec when the course has no students.
    pub async fn get_students_related_to_course(
        &self,
        course_name: &str,
    ) -> Result<Option<Vec<StudentWithCourses>>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(c) = find_course(&txn, course_name).await? else {
            txn.commit().await?;
            return Ok(None);
        };
        let students = c.find_related(student::Entity).order_by_asc(student::Column::Id).all(&txn).await?;
        let mut out = Vec::with_capacity(students.len());
        for s in students {
            let courses = courses_of(&txn, &s).await?;
            out.push(StudentWithCourses { student: s, courses });
        }
        txn.commit().await?;
        Ok(Some(out))
    }

    /// The student, its group and its courses.
    pub async fn get_student_with_full_info(&self, id: i32) -> Result<Option<StudentFullInfo>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(s) = student::Entity::find_by_id(id).one(&txn).await? else {
            txn.commit().await?;
            return Ok(None);
        };
        let group = s.find_related(group::Entity).one(&txn).await?;
        let courses = courses_of(&txn, &s).await?;
        txn.commit().await?;
        Ok(Some(StudentFullInfo { student: s, group, courses }))
    }

    /// Insert a student under a caller-chosen id.
    ///
    /// One autocommit insert: the primary key rejects a taken id and the group
    /// foreign key an unknown group, so of two concurrent calls with the same id
    /// exactly one succeeds. The group lookup only gives the clearer error first.
    pub async fn add_new_student(
        &self,
        id: i32,
        group_id: Option<i32>,
        first_name: &str,
        last_name: &str,
    ) -> Result<student::Model, ServiceError> {
        student::validate_names(first_name, last_name)?;
        if let Some(gid) = group_id {
            if group::Entity::find_by_id(gid).one(&self.db).await?.is_none() {
                return Err(ServiceError::ConstraintViolation(format!("group {} does not exist", gid)));
            }
        }
        let am = student::ActiveModel {
            id: Set(id),
            group_id: Set(group_id),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
        };
        let created = am.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::AlreadyExists(format!("student {}", id)),
            _ => ServiceError::from(e),
        })?;
        info!(student_id = id, group_id = ?group_id, "student added");
        Ok(created)
    }

    pub async fn check_if_student_exists(&self, id: i32) -> Result<bool, ServiceError> {
        let count = student::Entity::find().filter(student::Column::Id.eq(id)).count(&self.db).await?;
        Ok(count > 0)
    }

    /// Link a student to a course. Returns `false` when the link already existed.
    pub async fn add_student_to_course(&self, student_id: i32, course_name: &str) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let (s, c) = link_ends(&txn, student_id, course_name).await?;
        let existing = course_student::Entity::find_by_id((c.id, s.id)).one(&txn).await?;
        if existing.is_some() {
            txn.commit().await?;
            debug!(student_id, course = course_name, "course link already present");
            return Ok(false);
        }
        course_student::ActiveModel { course_id: Set(c.id), student_id: Set(s.id) }.insert(&txn).await?;
        txn.commit().await?;
        info!(student_id, course = course_name, "student added to course");
        Ok(true)
    }

    /// Delete a student and its course links.
    pub async fn delete_student_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        if student::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(ServiceError::InvalidStudent(id));
        }
        course_student::Entity::delete_many()
            .filter(course_student::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        student::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        info!(student_id = id, "student deleted");
        Ok(())
    }

    /// Unlink a student from a course.
    pub async fn remove_student_from_course(&self, student_id: i32, course_name: &str) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let (s, c) = link_ends(&txn, student_id, course_name).await?;
        let res = course_student::Entity::delete_by_id((c.id, s.id)).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::InvalidAssociation { student_id, course_name: course_name.to_string() });
        }
        txn.commit().await?;
        info!(student_id, course = course_name, "student removed from course");
        Ok(())
    }

    /// Students of a group, ordered by id. Unknown groups yield an empty vec.
    pub async fn get_students_related_to_group(&self, group_id: i32) -> Result<Vec<student::Model>, ServiceError> {
        let students = student::Entity::find()
            .filter(student::Column::GroupId.eq(group_id))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;
        Ok(students)
    }
}
