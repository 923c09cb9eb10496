#[cfg(test)]
pub mod test_db {
    use crate::auth::User;
    use crate::db::{assign_role_to_user, create_user, find_role_by_name, get_user, resource};
    use crate::error::AppError;
    use crate::models::{Course, NewCourse};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Pool, Sqlite};
    use std::collections::HashMap;
    use std::sync::Once;
    use tracing::log::LevelFilter;

    static INIT: Once = Once::new();
    pub static STANDARD_PASSWORD: &str = "password123";

    #[derive(Default)]
    pub struct TestDbBuilder {
        users: Vec<TestUser>,
        courses: Vec<TestCourse>,
    }

    pub struct TestUser {
        pub name: String,
        pub email: String,
        pub role: Option<String>,
        pub password: String,
    }

    pub struct TestCourse {
        pub name: String,
        pub owner_email: String,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        fn user(mut self, name: &str, email: &str, role: Option<&str>) -> Self {
            self.users.push(TestUser {
                name: name.to_string(),
                email: email.to_string(),
                role: role.map(String::from),
                password: STANDARD_PASSWORD.to_string(),
            });
            self
        }

        pub fn student(self, name: &str, email: &str) -> Self {
            self.user(name, email, Some("student"))
        }

        pub fn teacher(self, name: &str, email: &str) -> Self {
            self.user(name, email, Some("teacher"))
        }

        pub fn admin(self, name: &str, email: &str) -> Self {
            self.user(name, email, Some("admin"))
        }

        pub fn user_without_role(self, name: &str, email: &str) -> Self {
            self.user(name, email, None)
        }

        /// A course created by (and therefore enrolling) `owner_email`.
        pub fn course(mut self, name: &str, owner_email: &str) -> Self {
            self.courses.push(TestCourse {
                name: name.to_string(),
                owner_email: owner_email.to_string(),
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .filter_level(LevelFilter::Debug)
                    .is_test(true)
                    .try_init();
            });

            // A single connection keeps every query on the same in-memory database.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            let mut user_id_map: HashMap<String, i64> = HashMap::new();
            let mut course_id_map: HashMap<String, i64> = HashMap::new();

            for user in &self.users {
                let user_id = create_user(&pool, &user.name, &user.email, &user.password).await?;

                if let Some(role_name) = &user.role {
                    let role = find_role_by_name(&pool, role_name).await?.ok_or_else(|| {
                        AppError::NotFound(format!("Seeded role {} missing", role_name))
                    })?;
                    assign_role_to_user(&pool, user_id, role.id).await?;
                }

                user_id_map.insert(user.email.clone(), user_id);
            }

            for course in &self.courses {
                let owner_id = user_id_map.get(&course.owner_email).copied().ok_or_else(|| {
                    AppError::NotFound(format!("Course owner {} missing", course.owner_email))
                })?;
                let owner = get_user(&pool, owner_id).await?;

                let created = resource::create::<Course>(
                    &pool,
                    &owner,
                    NewCourse {
                        name: course.name.clone(),
                        description: None,
                    },
                )
                .await?;

                course_id_map.insert(course.name.clone(), created.id);
            }

            Ok(TestDb {
                pool,
                user_id_map,
                course_id_map,
            })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub user_id_map: HashMap<String, i64>,
        pub course_id_map: HashMap<String, i64>,
    }

    impl TestDb {
        pub fn user_id(&self, email: &str) -> Option<i64> {
            self.user_id_map.get(email).copied()
        }

        pub fn course_id(&self, name: &str) -> Option<i64> {
            self.course_id_map.get(name).copied()
        }

        pub async fn user(&self, email: &str) -> User {
            let id = self.user_id(email).expect("User not found in test database");
            get_user(&self.pool, id).await.expect("Failed to load test user")
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use crate::api::auth::AuthResponse;
    use crate::env::AppConfig;
    use crate::view::ApiClient;
    use crate::{init_rocket, init_rocket_with};
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use rocket::{Shutdown, tokio};
    use serde_json::json;
    use std::net::TcpListener;
    use std::time::Duration;

    pub use super::test_db::{STANDARD_PASSWORD, TestDb, TestDbBuilder};

    pub const ADMIN_EMAIL: &str = "admin@laredu.test";
    pub const TEACHER_EMAIL: &str = "teacher@laredu.test";
    pub const STUDENT_EMAIL: &str = "student@laredu.test";
    pub const OTHER_STUDENT_EMAIL: &str = "other@laredu.test";

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .admin("Admin User", ADMIN_EMAIL)
            .teacher("Teacher User", TEACHER_EMAIL)
            .student("Student User", STUDENT_EMAIL)
            .student("Other Student", OTHER_STUDENT_EMAIL)
            .course("Matemáticas", TEACHER_EMAIL)
            .build()
            .await
            .expect("Failed to build standard test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.pool.clone(), AppConfig::default()).await;
        let client = Client::tracked(rocket)
            .await
            .expect("Failed to create Rocket client");

        (client, test_db)
    }

    /// Serves the API over real HTTP on a free local port, for the reqwest-backed views.
    /// Returns a client rooted at `/api` and the handle that stops the server.
    pub async fn spawn_test_server(test_db: &TestDb) -> (ApiClient, Shutdown) {
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .map(|addr| addr.port())
            .expect("Failed to reserve a local port");

        let figment = rocket::Config::figment()
            .merge(("address", "127.0.0.1"))
            .merge(("port", port));

        let rocket = init_rocket_with(figment, test_db.pool.clone(), AppConfig::default())
            .await
            .ignite()
            .await
            .expect("Failed to ignite Rocket");
        let shutdown = rocket.shutdown();

        tokio::spawn(async move {
            if let Err(e) = rocket.launch().await {
                panic!("Test server failed: {}", e);
            }
        });

        let base_url = format!("http://127.0.0.1:{}/api", port);
        let health = format!("{}/health", base_url);
        for _ in 0..50 {
            match reqwest::get(&health).await {
                Ok(response) if response.status().is_success() => {
                    return (ApiClient::new(format!("{}/", base_url)), shutdown);
                }
                _ => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }

        panic!("Test server on port {} never became ready", port);
    }

    pub async fn login_test_user(client: &Client, email: &str, password: &str) -> String {
        let response = client
            .post("/api/login")
            .header(ContentType::JSON)
            .body(json!({ "email": email, "password": password }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok, "Login failed for {}", email);

        let auth: AuthResponse = response
            .into_json()
            .await
            .expect("Login response was not valid JSON");

        auth.token
    }

    pub fn bearer(token: &str) -> Header<'static> {
        Header::new("Authorization", format!("Bearer {}", token))
    }
}
