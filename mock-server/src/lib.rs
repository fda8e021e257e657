use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Data served by the mock API. Entries are raw JSON so tests can serve
/// payloads the real client must reject (numeric ids, wrong shapes).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub retail: Vec<Value>,
    #[serde(default)]
    pub classic: Vec<Value>,
    #[serde(default)]
    pub tukui: Option<Value>,
    #[serde(default)]
    pub elvui: Option<Value>,
}

impl Fixtures {
    /// A small data set modelled on the live API.
    pub fn sample() -> Self {
        Fixtures {
            retail: vec![
                json!({
                    "id": "3",
                    "name": "AddOnSkins",
                    "small_desc": "Skins for AddOns",
                    "author": "Azilroka",
                    "version": "3.53",
                    "screenshot_url": "https://www.tukui.org/3",
                    "url": "https://www.tukui.org/addons.php?download=3",
                    "category": "Skins",
                    "downloads": "46156",
                    "lastupdate": "2017-09-09 07:09:10",
                    "patch": "7.2.5",
                    "last_download": "2017-09-14 15:20:22",
                    "web_url": "https://www.tukui.org/addons.php?id=3",
                    "donate_url": "https://www.paypal.com/cgi-bin/webscr?cmd=_s-xclick&hosted_button_id=TENQSTDX5SEWE"
                }),
                json!({
                    "id": "6",
                    "name": "BenikUI",
                    "small_desc": "External ElvUI mod that adds decorations and extra features.",
                    "author": "Benik",
                    "version": "3.32",
                    "screenshot_url": "https://www.tukui.org/6",
                    "url": "https://www.tukui.org/addons.php?download=6",
                    "category": "Edited UIs & Compilations",
                    "downloads": "360540",
                    "lastupdate": "2017-08-30 21:50:25",
                    "patch": "7.2.5",
                    "last_download": "2017-09-14 15:25:58",
                    "web_url": "https://www.tukui.org/addons.php?id=6",
                    "changelog": "https://www.tukui.org/addons.php?id=6&changelog"
                }),
            ],
            classic: vec![
                json!({
                    "id": "1",
                    "name": "Tukui",
                    "small_desc": "A clean, lightweight, minimalist and popular user interface among the warcraft community since 2007.",
                    "author": "Tukz",
                    "version": "1.38",
                    "screenshot_url": "https://www.tukui.org/1",
                    "url": "https://www.tukui.org/classic-addons.php?download=1",
                    "category": "Interfaces",
                    "downloads": "260226",
                    "lastupdate": "2020-07-11 23:10:36",
                    "patch": "1.13.4",
                    "last_download": "2020-09-21 13:42:09",
                    "web_url": "https://www.tukui.org/classic-addons.php?id=1",
                    "donate_url": "https://www.tukui.org/support.php"
                }),
                json!({
                    "id": "2",
                    "name": "ElvUI",
                    "small_desc": "A user interface designed around user-friendliness with extra features that are not included in the standard ui.",
                    "author": "Elv",
                    "version": "1.31",
                    "screenshot_url": "https://www.tukui.org/2",
                    "url": "https://www.tukui.org/classic-addons.php?download=2",
                    "category": "Interfaces",
                    "downloads": "1046721",
                    "lastupdate": "2020-09-07 19:42:13",
                    "patch": "1.13.5",
                    "last_download": "2020-09-21 13:58:12",
                    "web_url": "https://www.tukui.org/classic-addons.php?id=2",
                    "donate_url": "https://www.tukui.org/support.php"
                }),
                json!({
                    "id": "3",
                    "name": "AddOnSkins",
                    "small_desc": "Skins for AddOns",
                    "author": "Azilroka",
                    "version": "3.53",
                    "screenshot_url": "https://www.tukui.org/3",
                    "url": "https://www.tukui.org/classic-addons.php?download=3",
                    "category": "Skins",
                    "downloads": "46156",
                    "lastupdate": "2017-09-09 07:09:10",
                    "patch": "7.2.5",
                    "last_download": "2017-09-14 15:20:22",
                    "web_url": "https://www.tukui.org/classic-addons.php?id=3",
                    "donate_url": "https://www.paypal.com/cgi-bin/webscr?cmd=_s-xclick&hosted_button_id=TENQSTDX5SEWE"
                }),
            ],
            tukui: Some(json!({
                "name": "Tukui",
                "author": "Tukz",
                "url": "https://www.tukui.org/downloads/tukui-18.28.zip",
                "version": "18.28",
                "changelog": "https://www.tukui.org/ui/tukui/changelog",
                "ticket": "https://git.tukui.org/Tukz/Tukui/issues",
                "git": "https://git.tukui.org/Tukz/Tukui",
                "id": -1,
                "patch": "8.3",
                "lastupdate": "2020-07-07",
                "web_url": "https://www.tukui.org/download.php?ui=tukui",
                "lastdownload": "2020-09-21 11:10:00",
                "donate_url": "http://www.tukui.org/support.php",
                "small_desc": "Minimalistic and lightweight world of warcraft user interface",
                "screenshot_url": "https://www.tukui.org/images/screenshots/t4.jpg",
                "downloads": 2147483000,
                "category": "Full UI Replacements"
            })),
            elvui: Some(json!({
                "name": "ElvUI",
                "author": "Elv/Blazeflack",
                "url": "https://www.tukui.org/downloads/elvui-11.52.zip",
                "version": "11.52",
                "changelog": "https://www.tukui.org/ui/elvui/changelog",
                "ticket": "https://git.tukui.org/elvui/elvui/issues",
                "git": "https://git.tukui.org/elvui/elvui",
                "id": -2,
                "patch": "8.3",
                "lastupdate": "2020-09-04",
                "web_url": "https://www.tukui.org/download.php?ui=elvui",
                "lastdownload": "2020-09-21 13:34:28",
                "donate_url": "http://www.tukui.org/support.php",
                "small_desc": "A user interface designed around user-friendliness with extra features that are not included in the standard ui",
                "screenshot_url": "https://www.tukui.org/images/screenshots/DarkTheme_ThickBorders_DPS.jpg",
                "downloads": 2147483000,
                "category": "Full UI Replacements"
            })),
        }
    }
}

pub type Db = Arc<Fixtures>;

pub fn app(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/", get(api))
        .route("/api.php", get(api))
        .with_state(db)
}

pub async fn run(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixtures)).await
}

/// Dispatch on the single query parameter. Anything unknown, including
/// unknown ids, gets a 200 with an empty body like the live API.
async fn api(State(db): State<Db>, Query(params): Query<HashMap<String, String>>) -> Response {
    if params.len() != 1 {
        debug!(count = params.len(), "expected exactly one query parameter");
        return empty();
    }
    let Some((key, value)) = params.iter().next() else {
        return empty();
    };
    debug!(%key, %value, "api request");

    match (key.as_str(), value.as_str()) {
        ("addon", id) => find(&db.retail, id),
        ("classic-addon", id) => find(&db.classic, id),
        ("addons", "all") => Json(db.retail.clone()).into_response(),
        ("classic-addons", "all") => Json(db.classic.clone()).into_response(),
        ("ui", "tukui") => db.tukui.clone().map_or_else(empty, |ui| Json(ui).into_response()),
        ("ui", "elvui") => db.elvui.clone().map_or_else(empty, |ui| Json(ui).into_response()),
        _ => empty(),
    }
}

fn find(addons: &[Value], id: &str) -> Response {
    addons
        .iter()
        .find(|addon| id_of(addon).as_deref() == Some(id))
        .map_or_else(empty, |addon| Json(addon.clone()).into_response())
}

fn id_of(addon: &Value) -> Option<String> {
    match addon.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn empty() -> Response {
    (StatusCode::OK, "").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_of_accepts_strings_and_numbers() {
        assert_eq!(id_of(&json!({"id": "3"})).as_deref(), Some("3"));
        assert_eq!(id_of(&json!({"id": -1})).as_deref(), Some("-1"));
        assert_eq!(id_of(&json!({"id": null})), None);
        assert_eq!(id_of(&json!({"name": "x"})), None);
    }

    #[test]
    fn sample_has_both_catalogs_and_uis() {
        let fixtures = Fixtures::sample();
        assert_eq!(fixtures.retail.len(), 2);
        assert_eq!(fixtures.classic.len(), 3);
        assert_eq!(fixtures.tukui.as_ref().unwrap()["id"], -1);
        assert_eq!(fixtures.elvui.as_ref().unwrap()["downloads"], 2147483000);
    }

    #[test]
    fn fixtures_load_from_partial_json() {
        let fixtures: Fixtures = serde_json::from_str(r#"{"classic": [{"id": "9"}]}"#).unwrap();
        assert!(fixtures.retail.is_empty());
        assert_eq!(fixtures.classic.len(), 1);
        assert!(fixtures.tukui.is_none());
    }
}
