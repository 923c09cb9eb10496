#[cfg(test)]
mod tests {
    use crate::auth::{KnownRole, Permission};
    use crate::db::resource::{self, Reference, ensure_references};
    use crate::db::{
        assign_role_to_user, authenticate_user, ensure_admin_user, find_role_by_name,
        find_user_by_email, get_conversation, get_user, mark_message_read, remove_role_from_user,
    };
    use crate::error::AppError;
    use crate::models::{
        CalendarEvent, CalendarEventChanges, Course, Message, NewCalendarEvent, NewMessage,
        NewRole, Role,
    };
    use crate::test::test_db::{STANDARD_PASSWORD, TestDbBuilder};
    use chrono::{TimeZone, Utc};
    use rocket::tokio;

    const ANA: &str = "ana@laredu.test";
    const BEA: &str = "bea@laredu.test";
    const ADMIN: &str = "admin@laredu.test";

    #[tokio::test]
    async fn test_get_user_with_roles() {
        let test_db = TestDbBuilder::new()
            .teacher("Ana", ANA)
            .user_without_role("Bea", BEA)
            .build()
            .await
            .expect("Failed to build test database");

        let ana = test_db.user(ANA).await;
        assert_eq!(ana.name, "Ana");
        assert!(ana.has_role(KnownRole::Teacher.as_str()));
        assert_eq!(KnownRole::from_name(" Teacher "), Some(KnownRole::Teacher));
        assert!(ana.has_permission(Permission::GradeSubmissions));
        assert!(!ana.has_permission(Permission::ManageRoles));

        let bea = test_db.user(BEA).await;
        assert!(bea.roles.is_empty());
        assert!(bea.require_permission(Permission::ViewAllSubmissions).is_err());

        assert!(matches!(
            get_user(&test_db.pool, 9999).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let test_db = TestDbBuilder::new()
            .student("Ana", ANA)
            .build()
            .await
            .expect("Failed to build test database");

        let user = authenticate_user(&test_db.pool, ANA, STANDARD_PASSWORD)
            .await
            .expect("Authentication query failed");
        assert_eq!(user.map(|u| u.email), Some(ANA.to_string()));

        let rejected = authenticate_user(&test_db.pool, ANA, "not-the-password")
            .await
            .expect("Authentication query failed");
        assert!(rejected.is_none());

        let unknown = authenticate_user(&test_db.pool, "nobody@laredu.test", STANDARD_PASSWORD)
            .await
            .expect("Authentication query failed");
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_ensure_admin_user_is_repeatable() {
        let test_db = TestDbBuilder::new()
            .build()
            .await
            .expect("Failed to build test database");

        let first = ensure_admin_user(&test_db.pool, "Root", ADMIN, "bootstrap-pass")
            .await
            .expect("Failed to bootstrap admin");
        let second = ensure_admin_user(&test_db.pool, "Root", ADMIN, "another-pass")
            .await
            .expect("Failed to bootstrap admin twice");

        assert_eq!(first.id, second.id);
        assert!(second.has_permission(Permission::ManageRoles));
        assert_eq!(second.roles.len(), 1);

        let still_original = authenticate_user(&test_db.pool, ADMIN, "bootstrap-pass")
            .await
            .expect("Authentication query failed");
        assert!(still_original.is_some());
    }

    #[tokio::test]
    async fn test_role_assignment() {
        let test_db = TestDbBuilder::new()
            .user_without_role("Ana", ANA)
            .build()
            .await
            .expect("Failed to build test database");

        let ana_id = test_db.user_id(ANA).unwrap();
        let student = find_role_by_name(&test_db.pool, "student")
            .await
            .unwrap()
            .expect("student role should be seeded");

        let user = assign_role_to_user(&test_db.pool, ana_id, student.id)
            .await
            .expect("Failed to assign role");
        assert_eq!(user.roles, vec![student.clone()]);

        let user = remove_role_from_user(&test_db.pool, ana_id, student.id)
            .await
            .expect("Failed to remove role");
        assert!(user.roles.is_empty());

        assert!(matches!(
            remove_role_from_user(&test_db.pool, ana_id, student.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            assign_role_to_user(&test_db.pool, ana_id, 9999).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_role_names_are_normalized_and_unique() {
        let test_db = TestDbBuilder::new()
            .admin("Admin", ADMIN)
            .build()
            .await
            .expect("Failed to build test database");
        let admin = test_db.user(ADMIN).await;

        let role = resource::create::<Role>(
            &test_db.pool,
            &admin,
            NewRole {
                name: "  Coordinator ".to_string(),
            },
        )
        .await
        .expect("Failed to create role");
        assert_eq!(role.name, "coordinator");

        let duplicate = resource::create::<Role>(
            &test_db.pool,
            &admin,
            NewRole {
                name: "coordinator".to_string(),
            },
        )
        .await;
        assert!(matches!(duplicate, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_ensure_references() {
        let test_db = TestDbBuilder::new()
            .student("Ana", ANA)
            .build()
            .await
            .expect("Failed to build test database");
        let ana_id = test_db.user_id(ANA).unwrap();

        ensure_references(&test_db.pool, &[Reference::new("receiver_id", "users", ana_id)])
            .await
            .expect("Existing reference should pass");

        match ensure_references(&test_db.pool, &[Reference::new("course_id", "courses", 77)]).await {
            Err(AppError::InvalidFields(errors)) => {
                assert!(errors.contains_key("course_id"));
            }
            other => panic!("Expected invalid field error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_courses_are_scoped_to_enrolment() {
        let test_db = TestDbBuilder::new()
            .teacher("Ana", ANA)
            .student("Bea", BEA)
            .course("Química", ANA)
            .course("Biología", BEA)
            .build()
            .await
            .expect("Failed to build test database");

        let ana = test_db.user(ANA).await;
        let courses = resource::list::<Course>(&test_db.pool, &ana).await.unwrap();
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Química"]);

        let foreign = test_db.course_id("Biología").unwrap();
        assert!(matches!(
            resource::get::<Course>(&test_db.pool, &ana, foreign).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            resource::delete::<Course>(&test_db.pool, &ana, foreign).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_calendar_update_keeps_missing_fields() {
        let test_db = TestDbBuilder::new()
            .student("Ana", ANA)
            .build()
            .await
            .expect("Failed to build test database");
        let ana = test_db.user(ANA).await;
        let date = Utc.with_ymd_and_hms(2026, 11, 20, 9, 0, 0).unwrap();

        let event = resource::create::<CalendarEvent>(
            &test_db.pool,
            &ana,
            NewCalendarEvent {
                title: "Examen".to_string(),
                date: Some(date),
            },
        )
        .await
        .expect("Failed to create event");
        assert_eq!(event.user_id, ana.id);

        let updated = resource::update::<CalendarEvent>(
            &test_db.pool,
            &ana,
            event.id,
            CalendarEventChanges {
                title: Some("Examen final".to_string()),
                date: None,
            },
        )
        .await
        .expect("Failed to update event");

        assert_eq!(updated.title, "Examen final");
        assert_eq!(updated.date, date);
    }

    #[tokio::test]
    async fn test_messages_between_users() {
        let test_db = TestDbBuilder::new()
            .student("Ana", ANA)
            .teacher("Bea", BEA)
            .build()
            .await
            .expect("Failed to build test database");
        let ana = test_db.user(ANA).await;
        let bea = test_db.user(BEA).await;

        let sent = resource::create::<Message>(
            &test_db.pool,
            &ana,
            NewMessage {
                receiver_id: bea.id,
                content: "Hola".to_string(),
            },
        )
        .await
        .expect("Failed to send message");

        let empty = resource::create::<Message>(
            &test_db.pool,
            &ana,
            NewMessage {
                receiver_id: bea.id,
                content: String::new(),
            },
        )
        .await;
        assert!(matches!(empty, Err(AppError::InvalidFields(_))));

        assert!(matches!(
            mark_message_read(&test_db.pool, &ana, sent.id).await,
            Err(AppError::Authorization(_))
        ));

        let read = mark_message_read(&test_db.pool, &bea, sent.id)
            .await
            .expect("Receiver should mark as read");
        assert!(read.is_read);

        let thread = get_conversation(&test_db.pool, &bea, ana.id).await.unwrap();
        assert_eq!(thread, vec![read]);

        assert!(find_user_by_email(&test_db.pool, ANA).await.unwrap().is_some());
    }
}
