use crate::api::{self, attendance, dashboard, employee};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Result, anyhow};

pub type ApiLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter for the API scope.
pub fn build_limiter(requests_per_min: u32) -> Result<ApiLimiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {} requests per minute", requests_per_min))
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiter: &ApiLimiter) {
    cfg.app_data(api::json_config())
        .app_data(api::path_config())
        .route("/health", web::get().to(api::health));

    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(limiter))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/attendance
                    .service(
                        web::resource("/{id}/attendance")
                            .route(web::get().to(attendance::employee_attendance_history))
                            .route(web::post().to(attendance::mark_employee_attendance)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                    // /attendance/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(attendance::attendance_history)),
                    ),
            )
            .service(
                web::resource("/dashboard/stats").route(web::get().to(dashboard::dashboard_stats)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{AttendanceRepository, Clock, Dashboard, EmployeeRepository};
    use crate::store::MemoryStore;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web::Data};
    use serde_json::{Value, json};
    use std::sync::Arc;

    macro_rules! test_app {
        () => {{
            let store = Arc::new(MemoryStore::new());
            let employees = EmployeeRepository::new(store.clone());
            let attendance = AttendanceRepository::new(store);
            let dashboard = Dashboard::new(employees.clone(), attendance.clone(), Clock::utc());
            let limiter = build_limiter(10_000).unwrap();

            test::init_service(
                App::new()
                    .app_data(Data::new(employees))
                    .app_data(Data::new(attendance))
                    .app_data(Data::new(dashboard))
                    .configure(|cfg| configure(cfg, "/api", &limiter)),
            )
            .await
        }};
    }

    // the governor keys on the peer address
    fn with_peer(req: test::TestRequest) -> test::TestRequest {
        req.peer_addr("127.0.0.1:40000".parse().unwrap())
    }

    fn post(uri: &str, body: Value) -> test::TestRequest {
        with_peer(test::TestRequest::post().uri(uri).set_json(body))
    }

    fn get(uri: &str) -> test::TestRequest {
        with_peer(test::TestRequest::get().uri(uri))
    }

    fn delete(uri: &str) -> test::TestRequest {
        with_peer(test::TestRequest::delete().uri(uri))
    }

    fn ana() -> Value {
        json!({
            "employeeId": "E1",
            "fullName": "Ana",
            "email": "ana@x.com",
            "department": "Eng"
        })
    }

    #[actix_web::test]
    async fn employee_and_attendance_walkthrough() {
        let app = test_app!();

        let resp = test::call_service(&app, post("/api/employees", ana()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["employeeId"], "E1");
        let id = created["id"].as_u64().unwrap();

        let mut duplicate = ana();
        duplicate["email"] = json!("other@x.com");
        let resp = test::call_service(&app, post("/api/employees", duplicate).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Employee ID already exists" }));

        let present = json!({ "employeeId": id, "date": "2024-01-01", "status": "Present" });
        let resp = test::call_service(&app, post("/api/attendance", present).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let first: Value = test::read_body_json(resp).await;
        assert_eq!(first["status"], "Present");

        let absent = json!({ "employeeId": id, "date": "2024-01-01", "status": "Absent" });
        let resp = test::call_service(&app, post("/api/attendance", absent).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let second: Value = test::read_body_json(resp).await;
        assert_eq!(second["status"], "Absent");
        assert_eq!(second["id"], first["id"]);

        let uri = format!("/api/attendance/{}", id);
        let resp = test::call_service(&app, get(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let history: Value = test::read_body_json(resp).await;
        assert_eq!(
            history,
            json!([{ "id": first["id"], "employeeId": id, "date": "2024-01-01", "status": "Absent" }])
        );
    }

    #[actix_web::test]
    async fn list_includes_present_count() {
        let app = test_app!();
        let resp = test::call_service(&app, post("/api/employees", ana()).to_request()).await;
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_u64().unwrap();

        let uri = format!("/api/employees/{}/attendance", id);
        for (date, status) in [
            ("2024-01-01", "Present"),
            ("2024-01-02", "Present"),
            ("2024-01-03", "Absent"),
        ] {
            let body = json!({ "date": date, "status": status });
            let resp = test::call_service(&app, post(&uri, body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = test::call_service(&app, get("/api/employees").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed: Value = test::read_body_json(resp).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["presentCount"], 2);
        assert_eq!(listed[0]["fullName"], "Ana");

        let resp = test::call_service(&app, get(&uri).to_request()).await;
        let history: Value = test::read_body_json(resp).await;
        assert_eq!(history[0]["date"], "2024-01-03");
        assert_eq!(history[2]["date"], "2024-01-01");
    }

    #[actix_web::test]
    async fn validation_reports_first_failing_field() {
        let app = test_app!();

        let partial = json!({ "employeeId": "E1", "email": "bad" });
        let resp = test::call_service(&app, post("/api/employees", partial).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Full Name is required" }));

        let slashed = json!({ "employeeId": 1, "date": "2024/01/01", "status": "Present" });
        let resp = test::call_service(&app, post("/api/attendance", slashed).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Date must be in YYYY-MM-DD format" }));
    }

    #[actix_web::test]
    async fn wrongly_typed_body_is_a_bad_request() {
        let app = test_app!();
        let body = json!({ "employeeId": "one", "date": "2024-01-01", "status": "Present" });
        let resp = test::call_service(&app, post("/api/attendance", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[actix_web::test]
    async fn marking_unknown_employee_is_not_found() {
        let app = test_app!();
        let body = json!({ "employeeId": 77, "date": "2024-01-01", "status": "Present" });
        let resp = test::call_service(&app, post("/api/attendance", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_returns_no_content_then_not_found() {
        let app = test_app!();
        let resp = test::call_service(&app, post("/api/employees", ana()).to_request()).await;
        let created: Value = test::read_body_json(resp).await;
        let uri = format!("/api/employees/{}", created["id"]);

        let resp = test::call_service(&app, delete(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());

        let resp = test::call_service(&app, delete(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Employee not found" }));
    }

    #[actix_web::test]
    async fn non_numeric_id_is_a_bad_request() {
        let app = test_app!();
        let resp = test::call_service(&app, delete("/api/employees/abc").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn dashboard_counts_today_only() {
        let app = test_app!();
        let today = Clock::utc().today().to_string();

        let mut ids = Vec::new();
        for i in 0..3 {
            let body = json!({
                "employeeId": format!("E{}", i),
                "fullName": "Someone",
                "email": format!("e{}@x.com", i),
                "department": "Ops"
            });
            let resp = test::call_service(&app, post("/api/employees", body).to_request()).await;
            let created: Value = test::read_body_json(resp).await;
            ids.push(created["id"].as_u64().unwrap());
        }
        for (id, status) in ids.iter().zip(["Present", "Present", "Absent"]) {
            let body = json!({ "employeeId": id, "date": today, "status": status });
            let resp = test::call_service(&app, post("/api/attendance", body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = test::call_service(&app, get("/api/dashboard/stats").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let stats: Value = test::read_body_json(resp).await;
        assert_eq!(stats, json!({ "totalEmployees": 3, "presentToday": 2 }));
    }

    #[actix_web::test]
    async fn health_is_outside_the_api_prefix() {
        let app = test_app!();
        let resp = test::call_service(&app, get("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "ok": true }));
    }
}
