//! Mapping of content records onto the page's `data-content` slots.

use regex::Regex;
use std::sync::LazyLock;

use crate::bundle::{ContentBundle, ContentRecord};

pub const ABOUT_PAGE: &str = "about";

/// Projects shown in the works pager, in slide order.
pub const PROJECT_PAGES: &[&str] = &["works1", "works2", "works3"];

pub const PREVIEW_KEYS: [&str; 4] = ["image", "number", "title", "details"];

static GALLERY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image\d+$").expect("gallery key pattern should compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// `<img>` whose `src` is the value.
    Image,
    /// Element whose inner markup is the value.
    Markup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub key: &'static str,
    pub kind: SlotKind,
}

impl Slot {
    pub const fn image(key: &'static str) -> Self {
        Self {
            key,
            kind: SlotKind::Image,
        }
    }

    pub const fn markup(key: &'static str) -> Self {
        Self {
            key,
            kind: SlotKind::Markup,
        }
    }
}

/// Slots of the project detail overlay. The gallery container is separate.
pub const SHOW_WORK_SLOTS: &[Slot] = &[
    Slot::image("image"),
    Slot::markup("number"),
    Slot::markup("title"),
    Slot::markup("client"),
    Slot::markup("year"),
    Slot::markup("role"),
    Slot::markup("description"),
];

pub const ABOUT_SLOTS: &[Slot] = &[
    Slot::image("image"),
    Slot::markup("title"),
    Slot::markup("profile"),
    Slot::markup("experience"),
    Slot::markup("contact"),
    Slot::markup("image1"),
    Slot::markup("image2"),
];

pub fn is_gallery_key(key: &str) -> bool {
    GALLERY_KEY.is_match(key)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Image { src: String },
    Markup(String),
    /// Element content replaced by a single generated `<img>`.
    Picture { src: String },
}

impl Field {
    fn blank(kind: SlotKind) -> Self {
        match kind {
            SlotKind::Image => Self::Image { src: String::new() },
            SlotKind::Markup => Self::Markup(String::new()),
        }
    }

    fn filled(kind: SlotKind, value: &str) -> Self {
        match kind {
            SlotKind::Image => Self::Image {
                src: value.to_string(),
            },
            SlotKind::Markup => Self::Markup(value.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Image { src } | Self::Picture { src } => src.is_empty(),
            Self::Markup(s) => s.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
}

/// What a container shows after a projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<(&'static str, Field)>,
    gallery: Vec<Figure>,
}

impl Projection {
    /// Every slot emptied and no gallery figures.
    pub fn blank(slots: &[Slot]) -> Self {
        Self {
            fields: slots
                .iter()
                .map(|slot| (slot.key, Field::blank(slot.kind)))
                .collect(),
            gallery: Vec::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, f)| f)
    }

    pub fn src(&self, key: &str) -> String {
        match self.field(key) {
            Some(Field::Image { src }) | Some(Field::Picture { src }) => src.clone(),
            _ => String::new(),
        }
    }

    pub fn markup(&self, key: &str) -> String {
        match self.field(key) {
            Some(Field::Markup(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Field)> {
        self.fields.iter().map(|(k, f)| (*k, f))
    }

    pub fn gallery(&self) -> &[Figure] {
        &self.gallery
    }
}

fn gallery(record: &ContentRecord) -> Vec<Figure> {
    record
        .iter()
        .filter(|(key, _)| is_gallery_key(key))
        .map(|(key, src)| Figure {
            src: src.to_string(),
            alt: key.to_string(),
            caption: record
                .get(&format!("{key}capt"))
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
        .collect()
}

/// Every slot starts blank before the record is written. `None` when the
/// bundle has no such page.
pub fn project_content(
    bundle: &ContentBundle,
    page_id: &str,
    slots: &[Slot],
) -> Option<Projection> {
    let record = bundle.page(page_id)?;
    let mut projection = Projection::blank(slots);
    for (key, field) in projection.fields.iter_mut() {
        if let Some(value) = record.get(*key) {
            *field = Field::filled(field_kind(field), value);
        }
    }
    projection.gallery = gallery(record);
    Some(projection)
}

fn field_kind(field: &Field) -> SlotKind {
    match field {
        Field::Image { .. } => SlotKind::Image,
        Field::Markup(_) | Field::Picture { .. } => SlotKind::Markup,
    }
}

/// Gallery-pattern keys on markup slots become a single captionless image.
/// Keys missing from the record are left out.
pub fn project_about(bundle: &ContentBundle, slots: &[Slot]) -> Option<Projection> {
    let record = bundle.page(ABOUT_PAGE)?;
    let fields = slots
        .iter()
        .filter_map(|slot| {
            let value = record.get(slot.key)?;
            let field = match slot.kind {
                SlotKind::Markup if is_gallery_key(slot.key) => Field::Picture {
                    src: value.to_string(),
                },
                kind => Field::filled(kind, value),
            };
            Some((slot.key, field))
        })
        .collect();
    Some(Projection {
        fields,
        gallery: Vec::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub image: Option<String>,
    pub number: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
}

impl Preview {
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "image" => self.image.as_deref(),
            "number" => self.number.as_deref(),
            "title" => self.title.as_deref(),
            "details" => self.details.as_deref(),
            _ => None,
        }
    }
}

pub fn project_preview(bundle: &ContentBundle, page_id: &str) -> Option<Preview> {
    let record = bundle.page(page_id)?;
    let take = |key: &str| record.get(key).map(str::to_string);
    Some(Preview {
        image: take(PREVIEW_KEYS[0]),
        number: take(PREVIEW_KEYS[1]),
        title: take(PREVIEW_KEYS[2]),
        details: take(PREVIEW_KEYS[3]),
    })
}
