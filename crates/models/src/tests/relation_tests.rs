use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};

use super::setup_memory_db;
use crate::{course, course_student, group, student};

#[tokio::test]
async fn student_course_many_to_many() -> anyhow::Result<()> {
    let db = setup_memory_db().await?;
    let g = group::ActiveModel { name: Set("TU-69".into()), ..Default::default() }.insert(&db).await?;
    let s = student::ActiveModel {
        group_id: Set(Some(g.id)),
        first_name: Set("Evelyn".into()),
        last_name: Set("White".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let art = course::ActiveModel { name: Set("Art".into()), description: Set(None), ..Default::default() }
        .insert(&db)
        .await?;
    let german = course::ActiveModel { name: Set("German".into()), description: Set(None), ..Default::default() }
        .insert(&db)
        .await?;
    for c in [&art, &german] {
        course_student::ActiveModel { course_id: Set(c.id), student_id: Set(s.id) }.insert(&db).await?;
    }

    let courses = s.find_related(course::Entity).order_by_asc(course::Column::Id).all(&db).await?;
    assert_eq!(courses.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), ["Art", "German"]);

    let students = art.find_related(student::Entity).all(&db).await?;
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].first_name, "Evelyn");

    let members = g.find_related(student::Entity).all(&db).await?;
    assert_eq!(members.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_group_nulls_student_group() -> anyhow::Result<()> {
    let db = setup_memory_db().await?;
    let g = group::ActiveModel { name: Set("CX-73".into()), ..Default::default() }.insert(&db).await?;
    let s = student::ActiveModel {
        group_id: Set(Some(g.id)),
        first_name: Set("Lucas".into()),
        last_name: Set("Jones".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    group::Entity::delete_by_id(g.id).exec(&db).await?;
    let reloaded = student::Entity::find_by_id(s.id).one(&db).await?.expect("student kept");
    assert_eq!(reloaded.group_id, None);
    Ok(())
}

#[tokio::test]
async fn deleting_course_cascades_links_only() -> anyhow::Result<()> {
    let db = setup_memory_db().await?;
    let s = student::ActiveModel {
        group_id: Set(None),
        first_name: Set("Mia".into()),
        last_name: Set("Wilson".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let history = course::ActiveModel { name: Set("History".into()), description: Set(None), ..Default::default() }
        .insert(&db)
        .await?;
    let music = course::ActiveModel { name: Set("Music".into()), description: Set(None), ..Default::default() }
        .insert(&db)
        .await?;
    for c in [&history, &music] {
        course_student::ActiveModel { course_id: Set(c.id), student_id: Set(s.id) }.insert(&db).await?;
    }

    course::Entity::delete_by_id(history.id).exec(&db).await?;

    let links = course_student::Entity::find().all(&db).await?;
    assert_eq!(links.len(), 1);
    assert_eq!((links[0].course_id, links[0].student_id), (music.id, s.id));
    assert!(student::Entity::find_by_id(s.id).one(&db).await?.is_some());
    Ok(())
}
