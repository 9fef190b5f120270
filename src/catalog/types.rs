use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Collection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            description: None,
            links: Vec::new(),
        }
    }

    /// Human-readable name; falls back to the id when the catalog omits a title.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// A STAC item. Only `id`, `collection` and `properties` are typed; every other
/// member of the feature document is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection: None,
            properties: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn with_title(id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut item = Self::new(id);
        item.properties
            .insert("title".to_string(), Value::String(title.into()));
        item
    }

    /// The `title` property, or `""` when it is missing or not a string.
    pub fn title(&self) -> &str {
        self.properties
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// One page of a paginated listing: the entries it carries plus its links.
pub(crate) trait Page {
    type Entry;

    fn into_parts(self) -> (Vec<Self::Entry>, Vec<Link>);
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsPage {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Page for CollectionsPage {
    type Entry = Collection;

    fn into_parts(self) -> (Vec<Collection>, Vec<Link>) {
        (self.collections, self.links)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsPage {
    #[serde(default)]
    pub features: Vec<Item>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Page for ItemsPage {
    type Entry = Item;

    fn into_parts(self) -> (Vec<Item>, Vec<Link>) {
        (self.features, self.links)
    }
}

/// The `next` link of a page, if it can be followed with a plain GET.
pub(crate) fn next_link(links: &[Link]) -> Option<&Link> {
    links.iter().find(|l| {
        l.rel == "next"
            && l
                .method
                .as_deref()
                .is_none_or(|m| m.eq_ignore_ascii_case("GET"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_title_defaults_to_empty() {
        let item: Item = serde_json::from_value(json!({
            "type": "Feature",
            "id": "a",
            "properties": {"datetime": null}
        }))
        .unwrap();
        assert_eq!(item.title(), "");

        let item: Item = serde_json::from_value(json!({
            "id": "b",
            "properties": {"title": 42}
        }))
        .unwrap();
        assert_eq!(item.title(), "");
    }

    #[test]
    fn item_keeps_unknown_members() {
        let item: Item = serde_json::from_value(json!({
            "type": "Feature",
            "id": "a",
            "collection": "birds",
            "bbox": [0.0, 1.0, 2.0, 3.0],
            "properties": {"title": "Koster Seabirds"}
        }))
        .unwrap();
        assert_eq!(item.title(), "Koster Seabirds");
        assert_eq!(item.collection.as_deref(), Some("birds"));
        assert_eq!(item.extra.get("type"), Some(&json!("Feature")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["bbox"], json!([0.0, 1.0, 2.0, 3.0]));
    }

    #[test]
    fn collection_display_title_falls_back_to_id() {
        let c: Collection = serde_json::from_value(json!({"id": "fish"})).unwrap();
        assert_eq!(c.display_title(), "fish");
        assert_eq!(Collection::new("fish", "Fish").display_title(), "Fish");
    }

    #[test]
    fn next_link_skips_post_pagination() {
        let links = vec![
            Link {
                rel: "next".into(),
                href: "http://x/search".into(),
                media_type: None,
                method: Some("POST".into()),
            },
            Link {
                rel: "self".into(),
                href: "http://x/items".into(),
                media_type: None,
                method: None,
            },
        ];
        assert!(next_link(&links).is_none());

        let links = vec![Link {
            rel: "next".into(),
            href: "http://x/items?token=1".into(),
            media_type: Some("application/geo+json".into()),
            method: Some("get".into()),
        }];
        assert_eq!(next_link(&links).unwrap().href, "http://x/items?token=1");
    }
}
