mod common;

use axum::http::StatusCode;
use common::{OWNER, TestApp};
use serde_json::Value;

fn ids(view: &Value, field: &str) -> Vec<i64> {
    view[field]
        .as_array()
        .expect("array field")
        .iter()
        .map(|s| s["id"].as_i64().expect("numeric id"))
        .collect()
}

#[tokio::test]
async fn owner_creates_then_deletes_a_snippet() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;

    app.post_form(
        "/admin/add",
        &[("category", "Rust"), ("title", "Hello"), ("code", "fn main(){}")],
    )
    .await
    .assert_redirect("/admin");
    let admin = app.get("/admin").await.json();
    assert_eq!(admin["flash"]["message"], "BOOM! New code snippet added!");
    assert_eq!(admin["is_owner"], true);
    let id = ids(&admin, "snippets")[0];

    let page = app.get("/category/Rust").await.json();
    assert_eq!(page["category_name"], "Rust");
    assert_eq!(ids(&page, "snippets"), vec![id]);
    assert_eq!(page["snippets"][0]["title"], "Hello");
    assert_eq!(page["snippets"][0]["code"], "fn main(){}");
    assert_eq!(page["is_owner"], true);

    let categories = app.get("/categories").await.json();
    assert_eq!(categories["categories"], serde_json::json!(["Rust"]));

    let deleted = app.post(&format!("/admin/delete/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let body = deleted.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["snippet_id"], id);

    let page = app.get("/category/Rust").await.json();
    assert!(ids(&page, "snippets").is_empty());
}

#[tokio::test]
async fn toggle_save_scenario_marks_and_unmarks() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;
    let go = app.owner_adds("Go", "Goroutines", "go func(){}()").await;
    app.owner_adds("Rust", "Hello", "fn main(){}").await;
    app.forget_cookies();

    app.signup("alice", "pw123").await;
    let saved = app.post(&format!("/save_snippet/{go}")).await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(
        saved.json(),
        serde_json::json!({"success": true, "action": "saved"})
    );

    let page = app.get("/category/Go").await.json();
    assert_eq!(page["saved_snippet_ids"], serde_json::json!([go]));
    assert_eq!(page["snippets"][0]["saved"], true);
    assert_eq!(ids(&app.get("/dashboard").await.json(), "snippets"), vec![go]);

    let unsaved = app.post(&format!("/save_snippet/{go}")).await.json();
    assert_eq!(unsaved["action"], "unsaved");

    let page = app.get("/category/Go").await.json();
    assert_eq!(page["saved_snippet_ids"], serde_json::json!([]));
    assert_eq!(page["snippets"][0]["saved"], false);
}

#[tokio::test]
async fn saving_a_missing_snippet_is_404() {
    let mut app = TestApp::spawn().await;
    app.signup("alice", "pw123").await;

    let resp = app.post("/save_snippet/42").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    let body = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Snippet not found");
}

#[tokio::test]
async fn deleting_removes_from_every_saved_set() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;
    let doomed = app.owner_adds("Go", "doomed", "x").await;
    let kept = app.owner_adds("Go", "kept", "y").await;
    app.forget_cookies();

    for user in ["alice", "bob"] {
        app.forget_cookies();
        app.signup(user, "pw").await;
        app.post(&format!("/save_snippet/{doomed}")).await;
        app.post(&format!("/save_snippet/{kept}")).await;
    }

    app.forget_cookies();
    app.login(OWNER, "ownerpw").await;
    assert_eq!(
        app.post(&format!("/admin/delete/{doomed}")).await.status,
        StatusCode::OK
    );

    for user in ["alice", "bob"] {
        app.forget_cookies();
        app.login(user, "pw").await;
        let dashboard = app.get("/dashboard").await.json();
        assert_eq!(ids(&dashboard, "snippets"), vec![kept]);
    }
}

#[tokio::test]
async fn non_owner_cannot_touch_the_catalog() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;
    let id = app.owner_adds("Go", "original", "package main").await;
    app.forget_cookies();

    app.signup("mallory", "pw").await;

    app.get("/admin").await.assert_redirect("/categories");
    let categories = app.get("/categories").await.json();
    assert_eq!(
        categories["flash"]["message"],
        "Whoa there! That's a super-secret page only for the owner!"
    );

    app.post_form(
        "/admin/add",
        &[("category", "Evil"), ("title", "t"), ("code", "c")],
    )
    .await
    .assert_redirect("/categories");

    app.post_form(
        &format!("/admin/update/{id}"),
        &[("category", "Evil"), ("title", "t"), ("code", "c")],
    )
    .await
    .assert_redirect("/categories");

    let denied = app.post(&format!("/admin/delete/{id}")).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.json()["message"], "Permission Denied");

    let missing = app.post("/admin/delete/999").await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);

    let page = app.get("/category/Go").await.json();
    assert_eq!(ids(&page, "snippets"), vec![id]);
    assert_eq!(page["snippets"][0]["title"], "original");
    let categories = app.get("/categories").await.json();
    assert_eq!(categories["categories"], serde_json::json!(["Go"]));
}

#[tokio::test]
async fn owner_updates_and_missing_ids_are_404() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;
    let id = app.owner_adds("Go", "old", "package main").await;

    app.post_form(
        &format!("/admin/update/{id}"),
        &[("category", "Rust"), ("title", "new"), ("code", "fn main() {}")],
    )
    .await
    .assert_redirect("/admin");

    let admin = app.get("/admin").await.json();
    assert_eq!(admin["flash"]["message"], "KACHOW! Snippet updated!");
    assert_eq!(admin["snippets"][0]["category"], "Rust");
    assert_eq!(admin["snippets"][0]["title"], "new");
    assert_eq!(admin["snippets"][0]["code"], "fn main() {}");

    let missing = app
        .post_form(
            "/admin/update/999",
            &[("category", "Rust"), ("title", "x"), ("code", "y")],
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    // a blank form does not mask the missing id
    let missing = app
        .post_form(
            "/admin/update/999",
            &[("category", ""), ("title", ""), ("code", "")],
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["code"], "NOT_FOUND");

    let missing = app.post("/admin/delete/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["success"], false);

    let admin = app.get("/admin").await.json();
    assert_eq!(ids(&admin, "snippets"), vec![id]);
}

#[tokio::test]
async fn invalid_snippet_form_flashes_on_admin_page() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;

    app.post_form("/admin/add", &[("category", "Go"), ("code", "x")])
        .await
        .assert_redirect("/admin");
    let admin = app.get("/admin").await.json();
    assert_eq!(admin["flash"]["message"], "title is required");
    assert!(ids(&admin, "snippets").is_empty());
}

#[tokio::test]
async fn category_names_are_matched_exactly() {
    let mut app = TestApp::spawn().await;
    app.signup(OWNER, "ownerpw").await;
    let cpp = app.owner_adds("C++", "vector", "std::vector<int> v;").await;
    app.owner_adds("C", "printf", "printf(\"hi\");").await;

    let page = app.get("/category/C%2B%2B").await.json();
    assert_eq!(page["category_name"], "C++");
    assert_eq!(ids(&page, "snippets"), vec![cpp]);

    let empty = app.get("/category/Haskell").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(ids(&empty.json(), "snippets").is_empty());
}
