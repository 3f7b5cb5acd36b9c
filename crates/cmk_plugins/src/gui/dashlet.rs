//! Link dashlet: a clickable button, card or minimal link to a dashboard,
//! a view or an external URL, or an embedded iframe.

use super::html::{escape, HtmlWriter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const TYPE_NAME: &str = "link_dashlet";
pub const INITIAL_SIZE: (u32, u32) = (20, 10);

/// Where the link points. Deserializes from the `[kind, value]` pair the
/// dashlet form stores, e.g. `["view", "allhosts"]` or
/// `["url", {"url": "https://…", "open_new": true}]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Value)")]
pub enum LinkType {
    Dashboard(String),
    View(String),
    Url { url: String, open_new: bool },
    Iframe(String),
    Unknown,
}

impl Default for LinkType {
    fn default() -> Self {
        LinkType::Dashboard("main".to_string())
    }
}

impl From<(String, Value)> for LinkType {
    fn from((kind, value): (String, Value)) -> Self {
        let text = |v: &Value| v.as_str().unwrap_or_default().to_string();
        match kind.as_str() {
            "dashboard" => LinkType::Dashboard(text(&value)),
            "view" => LinkType::View(text(&value)),
            "url" => LinkType::Url {
                url: value
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or("#")
                    .to_string(),
                open_new: value.get("open_new").and_then(Value::as_bool).unwrap_or(true),
            },
            "iframe" => LinkType::Iframe(text(&value)),
            _ => LinkType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    #[default]
    Button,
    Card,
    Minimal,
}

impl LinkStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            LinkStyle::Button => "style-button",
            LinkStyle::Card => "style-card",
            LinkStyle::Minimal => "style-minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Red,
}

impl LinkColor {
    /// Start and end color of the background gradient.
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            LinkColor::Blue => ("667eea", "764ba2"),
            LinkColor::Green => ("11998e", "38ef7d"),
            LinkColor::Purple => ("a8edea", "fed6e3"),
            LinkColor::Orange => ("f093fb", "f5576c"),
            LinkColor::Red => ("fa709a", "fee140"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashletConfig {
    pub link_type: LinkType,
    pub link_title: String,
    pub link_description: String,
    pub link_style: LinkStyle,
    pub link_icon: String,
    pub link_color: LinkColor,
}

impl Default for DashletConfig {
    fn default() -> Self {
        Self {
            link_type: LinkType::default(),
            link_title: "Link".to_string(),
            link_description: String::new(),
            link_style: LinkStyle::default(),
            link_icon: String::new(),
            link_color: LinkColor::default(),
        }
    }
}

impl DashletConfig {
    /// Invalid configurations render with defaults.
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Invalid {} config, using defaults: {}", TYPE_NAME, e);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
    /// Browsing context for `<a target>`; `None` for iframes.
    pub target: Option<&'static str>,
    pub is_iframe: bool,
}

pub fn resolve(link: &LinkType) -> LinkTarget {
    let link_to = |url: String, target| LinkTarget {
        url,
        target: Some(target),
        is_iframe: false,
    };
    match link {
        LinkType::Dashboard(name) => link_to(format!("dashboard.py?name={}", name), "_self"),
        LinkType::View(name) => link_to(format!("view.py?view_name={}", name), "_self"),
        LinkType::Url { url, open_new } => {
            link_to(url.clone(), if *open_new { "_blank" } else { "_self" })
        }
        LinkType::Iframe(url) => LinkTarget {
            url: url.clone(),
            target: None,
            is_iframe: true,
        },
        LinkType::Unknown => link_to("#".to_string(), "_self"),
    }
}

const STYLE_TEMPLATE: &str = r#"<style>
.link-dashlet-{id} { height: 100%; display: flex; align-items: center; justify-content: center; padding: 20px; box-sizing: border-box; font-family: inherit; }
.link-dashlet-{id} a { text-decoration: none; color: white; display: flex; flex-direction: column; align-items: center; justify-content: center; width: 100%; height: 100%; border-radius: 12px; background: linear-gradient(135deg, #{c1} 0%, #{c2} 100%); transition: all 0.3s ease; box-sizing: border-box; text-align: center; }
.link-dashlet-{id} a:hover { transform: translateY(-6px); box-shadow: 0 12px 25px rgba(0,0,0,0.25); }
.link-dashlet-{id} .icon { font-size: 48px; margin-bottom: 12px; }
.link-dashlet-{id} .title { font-weight: bold; margin-bottom: 6px; }
.link-dashlet-{id} .desc { font-size: 13px; opacity: 0.9; line-height: 1.3; }
.style-button a { padding: 30px; font-size: 22px; box-shadow: 0 8px 20px rgba(0,0,0,0.2); }
.style-button .title { font-size: 24px; }
.style-button .icon { font-size: 60px; }
.style-card a { padding: 20px; box-shadow: 0 6px 15px rgba(0,0,0,0.15); border: 1px solid rgba(255,255,255,0.2); }
.style-card .title { font-size: 20px; }
.style-card .icon { font-size: 50px; }
.style-minimal a { background: none !important; color: #333 !important; padding: 10px; border-radius: 8px; }
.style-minimal a:hover { background: rgba(0,0,0,0.05) !important; transform: none; box-shadow: none; }
.style-minimal .icon { font-size: 32px; margin-bottom: 8px; }
.style-minimal .title { font-size: 16px; color: #333; }
.style-minimal .desc { font-size: 12px; color: #666; }
.link-dashlet-{id} iframe { width: 100%; height: 100%; border: none; border-radius: 8px; }
</style>"#;

/// Render the dashlet. `dashlet_id` scopes the CSS so several link
/// dashlets on one dashboard do not share styles.
pub fn render(config: &DashletConfig, dashlet_id: u32) -> String {
    let (c1, c2) = config.link_color.gradient();
    let link = resolve(&config.link_type);
    let scope = format!("link-dashlet-{}", dashlet_id);

    let mut w = HtmlWriter::new();
    w.open("div", &[("style", "height: 100%; padding: 0; margin: 0;")]);
    w.raw(
        &STYLE_TEMPLATE
            .replace("{id}", &dashlet_id.to_string())
            .replace("{c1}", c1)
            .replace("{c2}", c2),
    );

    if link.is_iframe {
        w.open("div", &[("class", scope.as_str()), ("style", "padding: 0;")]);
        w.raw(&format!(
            r#"<iframe src="{}" allowfullscreen></iframe>"#,
            escape(&link.url)
        ));
        w.close("div");
    } else {
        let class = format!("{} {}", scope, config.link_style.css_class());
        w.open("div", &[("class", class.as_str())]);
        match link.target {
            Some(target) => w.open("a", &[("href", link.url.as_str()), ("target", target)]),
            None => w.open("a", &[("href", link.url.as_str())]),
        };
        if !config.link_icon.is_empty() {
            w.element("div", &[("class", "icon")], &config.link_icon);
        }
        w.element("div", &[("class", "title")], &config.link_title);
        if !config.link_description.is_empty() {
            w.element("div", &[("class", "desc")], &config.link_description);
        }
        w.close("a").close("div");
    }

    w.close("div");
    w.finish()
}
