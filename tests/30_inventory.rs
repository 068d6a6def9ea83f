mod common;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

async fn login(server: &TestServer, login: &str, password: &str) -> Result<reqwest::Response> {
    Ok(server
        .client
        .post(server.url("/login"))
        .json(&json!({ "login": login, "password": password }))
        .send()
        .await?)
}

async fn create_node(server: &TestServer, token: &str, name: &str, parent_id: Option<i64>) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/network-nodes"))
        .bearer_auth(token)
        .json(&json!({ "name": name, "description": "integration", "parent_id": parent_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json().await?)
}

async fn create_device(server: &TestServer, token: &str, serial: &str, node_id: Option<i64>) -> Result<reqwest::Response> {
    Ok(server
        .client
        .post(server.url("/devices"))
        .bearer_auth(token)
        .json(&json!({
            "type": "Router",
            "vendor": "Cisco",
            "model": "ISR 4331",
            "serial": serial,
            "location": "Rack 4",
            "network_node_id": node_id,
        }))
        .send()
        .await?)
}

fn find_in_tree<'a>(entries: &'a [Value], kind: &str, id: i64) -> Option<&'a Value> {
    let mut stack: Vec<&Value> = entries.iter().collect();
    while let Some(entry) = stack.pop() {
        if entry["type"] == kind && entry["id"] == id {
            return Some(entry);
        }
        if let Some(children) = entry["children"].as_array() {
            stack.extend(children.iter());
        }
    }
    None
}

fn id_of(value: &Value) -> Result<i64> {
    value["id"].as_i64().context("response has no numeric id")
}

#[tokio::test]
async fn seeded_users_can_log_in() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };

    let res = login(&server, "admin", "admin123").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["role"], "admin");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let res = login(&server, "viewer", "viewer123").await?;
    assert_eq!(res.json::<Value>().await?["role"], "viewer");

    let res = login(&server, "admin", "wrong").await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = login(&server, "nobody", "admin123").await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn issued_token_opens_protected_routes() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };

    let body: Value = login(&server, "viewer", "viewer123").await?.json().await?;
    let token = body["token"].as_str().context("missing token")?;

    let res = server.client.get(server.url("/devices")).bearer_auth(token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?.is_array());
    Ok(())
}

#[tokio::test]
async fn device_lifecycle() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();
    let serial = common::unique("SN");

    let res = create_device(&server, &token, &serial, None).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["status"], "active");
    assert_eq!(created["type"], "Router");
    let id = id_of(&created)?;

    let fetched: Value = server
        .client
        .get(server.url(&format!("/devices/{}", id)))
        .bearer_auth(server.viewer_token())
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched["serial"], serial.as_str());
    assert_eq!(fetched["model"], "ISR 4331");

    let res = server
        .client
        .put(server.url(&format!("/devices/{}", id)))
        .bearer_auth(&token)
        .json(&json!({ "status": "repair" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["status"], "repair");
    assert_eq!(updated["vendor"], "Cisco");

    let res = server
        .client
        .delete(server.url(&format!("/devices/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = server
        .client
        .get(server.url(&format!("/devices/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn duplicate_serial_conflicts() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();
    let serial = common::unique("DUP");

    assert_eq!(create_device(&server, &token, &serial, None).await?.status(), StatusCode::CREATED);
    let res = create_device(&server, &token, &serial, None).await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["error"], "Device with this serial already exists");
    Ok(())
}

#[tokio::test]
async fn device_on_missing_node_is_rejected() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };

    let res = create_device(&server, &server.admin_token(), &common::unique("ORPHAN"), Some(i64::MAX)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn tree_nests_nodes_and_devices() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();

    let a = id_of(&create_node(&server, &token, &common::unique("A"), None).await?)?;
    let b = id_of(&create_node(&server, &token, &common::unique("B"), Some(a)).await?)?;
    let device: Value = create_device(&server, &token, &common::unique("TREE"), Some(b)).await?.json().await?;
    let device_id = id_of(&device)?;

    let body: Value = server
        .client
        .get(server.url("/network-nodes/tree"))
        .bearer_auth(server.viewer_token())
        .send()
        .await?
        .json()
        .await?;
    let roots = body["tree"].as_array().context("tree is not an array")?;

    let root = roots.iter().find(|r| r["id"] == a).context("A is not a root")?;
    let children = root["children"].as_array().context("A has no children")?;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], b);
    assert_eq!(children[0]["type"], "node");

    let leaf = &children[0]["children"][0];
    assert_eq!(leaf["type"], "device");
    assert_eq!(leaf["id"], device_id);
    assert_eq!(leaf["name"], "Router: ISR 4331");
    assert!(find_in_tree(roots, "node", b).is_some());
    Ok(())
}

#[tokio::test]
async fn deleting_a_node_detaches_devices_and_promotes_children() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();

    let a = id_of(&create_node(&server, &token, &common::unique("A"), None).await?)?;
    let b = id_of(&create_node(&server, &token, &common::unique("B"), Some(a)).await?)?;
    let device = id_of(&create_device(&server, &token, &common::unique("DET"), Some(a)).await?.json().await?)?;

    let res = server
        .client
        .delete(server.url(&format!("/network-nodes/{}", a)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let child: Value = server
        .client
        .get(server.url(&format!("/network-nodes/{}", b)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert!(child["parent_id"].is_null());

    let detached: Value = server
        .client
        .get(server.url(&format!("/devices/{}", device)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert!(detached["network_node_id"].is_null());

    let res = server
        .client
        .delete(server.url(&format!("/network-nodes/{}", a)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn reparenting_under_a_descendant_is_rejected() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();

    let a = id_of(&create_node(&server, &token, &common::unique("A"), None).await?)?;
    let b = id_of(&create_node(&server, &token, &common::unique("B"), Some(a)).await?)?;

    for parent in [b, a] {
        let res = server
            .client
            .put(server.url(&format!("/network-nodes/{}", a)))
            .bearer_auth(&token)
            .json(&json!({ "parent_id": parent }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "parent {}", parent);
    }

    // Explicit null makes B a root again
    let res = server
        .client
        .put(server.url(&format!("/network-nodes/{}", b)))
        .bearer_auth(&token)
        .json(&json!({ "parent_id": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?["parent_id"].is_null());
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_supplied_status() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };

    let res = server
        .client
        .post(server.url("/devices"))
        .bearer_auth(server.admin_token())
        .json(&json!({
            "type": "Switch",
            "vendor": "Cisco",
            "model": "C9300",
            "serial": common::unique("STATUS"),
            "location": "Rack 1",
            "status": "retired",
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["status"], "active");
    Ok(())
}

#[tokio::test]
async fn node_fetch_is_one_level_deep() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();

    let a = id_of(&create_node(&server, &token, &common::unique("A"), None).await?)?;
    let b = id_of(&create_node(&server, &token, &common::unique("B"), Some(a)).await?)?;
    let c = id_of(&create_node(&server, &token, &common::unique("C"), Some(b)).await?)?;
    let on_b = id_of(&create_device(&server, &token, &common::unique("ON-B"), Some(b)).await?.json().await?)?;
    let on_c = id_of(&create_device(&server, &token, &common::unique("ON-C"), Some(c)).await?.json().await?)?;

    let fetch = |id: i64| {
        server
            .client
            .get(server.url(&format!("/network-nodes/{}", id)))
            .bearer_auth(server.viewer_token())
            .send()
    };

    let top: Value = fetch(a).await?.json().await?;
    let children = top["children"].as_array().context("A has no children")?;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], b);
    assert!(children[0].get("children").is_none());
    assert!(children[0].get("devices").is_none());
    assert!(top.get("devices").is_none());

    let middle: Value = fetch(b).await?.json().await?;
    let child_ids: Vec<&Value> = middle["children"].as_array().context("B has no children")?.iter().map(|n| &n["id"]).collect();
    assert_eq!(child_ids, vec![&json!(c)]);
    let device_ids: Vec<&Value> = middle["devices"].as_array().context("B has no devices")?.iter().map(|d| &d["id"]).collect();
    assert_eq!(device_ids, vec![&json!(on_b)]);
    assert!(!device_ids.contains(&&json!(on_c)));
    Ok(())
}

#[tokio::test]
async fn failed_node_delete_leaves_references_intact() -> Result<()> {
    let Some(server) = common::database_server().await? else { return Ok(()) };
    let token = server.admin_token();

    // Only rows named with this prefix are protected, so concurrent tests are unaffected
    sqlx::query(
        "CREATE OR REPLACE FUNCTION netinv_block_pinned_delete() RETURNS trigger AS $$
         BEGIN
             IF OLD.name LIKE 'pinned-%' THEN
                 RAISE EXCEPTION 'node % is pinned', OLD.id;
             END IF;
             RETURN OLD;
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(server.db.pool())
    .await?;
    sqlx::query("DROP TRIGGER IF EXISTS network_nodes_block_pinned ON network_nodes")
        .execute(server.db.pool())
        .await?;
    sqlx::query(
        "CREATE TRIGGER network_nodes_block_pinned BEFORE DELETE ON network_nodes
         FOR EACH ROW EXECUTE FUNCTION netinv_block_pinned_delete()",
    )
    .execute(server.db.pool())
    .await?;

    let a = id_of(&create_node(&server, &token, &common::unique("pinned"), None).await?)?;
    let b = id_of(&create_node(&server, &token, &common::unique("B"), Some(a)).await?)?;
    let device = id_of(&create_device(&server, &token, &common::unique("PIN"), Some(a)).await?.json().await?)?;

    let res = server
        .client
        .delete(server.url(&format!("/network-nodes/{}", a)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let device_node: Option<i64> = sqlx::query_scalar("SELECT network_node_id FROM devices WHERE id = $1")
        .bind(device)
        .fetch_one(server.db.pool())
        .await?;
    let child_parent: Option<i64> = sqlx::query_scalar("SELECT parent_id FROM network_nodes WHERE id = $1")
        .bind(b)
        .fetch_one(server.db.pool())
        .await?;
    let node_exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM network_nodes WHERE id = $1)")
        .bind(a)
        .fetch_one(server.db.pool())
        .await?;

    sqlx::query("DROP TRIGGER IF EXISTS network_nodes_block_pinned ON network_nodes")
        .execute(server.db.pool())
        .await?;

    assert_eq!(device_node, Some(a));
    assert_eq!(child_parent, Some(a));
    assert!(node_exists);
    Ok(())
}
