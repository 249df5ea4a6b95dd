//! In-memory template registry.

use std::collections::HashMap;

use deck_core::brand::BrandColorRole;
use deck_core::element::{
    BrandBindings, DataConfig, DataFormat, ElementKind, ImageConfig, ImageStyle, MediaType,
    ObjectFit, Position, ShapeConfig, ShapeKind, ShapeStyle, Size, TextAlign, TextConfig,
    TextStyle,
};
use deck_core::resolve::SlotStyling;

use crate::template::{
    AccessTier, ContentField, ElementSeed, FieldKind, Template, TemplateId, TemplateLayout,
};

/// Read-only lookup of the templates available to a project.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<TemplateId, Template>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in starter templates.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(title_template());
        registry.register(problem_template());
        registry.register(traction_template());
        registry
    }

    /// Add a template.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.id, template);
    }

    /// Look up a template by id.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(&id)
    }

    /// All templates, sorted by name for stable listings.
    #[must_use]
    pub fn list(&self) -> Vec<&Template> {
        let mut all: Vec<&Template> = self.templates.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Title slide: company name over a tagline, logo top-left, accent bar.
fn title_template() -> Template {
    let seeds = vec![
        ElementSeed {
            kind: ElementKind::Shape {
                style: ShapeStyle {
                    stroke_width: Some(0.0),
                    brand: BrandBindings::color(BrandColorRole::Primary),
                    ..ShapeStyle::default()
                },
                config: ShapeConfig {
                    kind: ShapeKind::Rectangle,
                },
            },
            position: Position::new(0.0, 1000.0),
            size: Size::fixed(1920.0, 80.0),
            z_index: 0,
        },
        ElementSeed {
            kind: ElementKind::Image {
                style: ImageStyle::default(),
                config: ImageConfig {
                    field_id: "logo".to_string(),
                    media_type: MediaType::Logo,
                    tags: std::collections::BTreeSet::new(),
                    object_fit: ObjectFit::Contain,
                    url: None,
                    fallback_url: None,
                },
            },
            position: Position::new(80.0, 60.0),
            size: Size::fixed(240.0, 120.0),
            z_index: 1,
        },
        ElementSeed {
            kind: ElementKind::Text {
                style: TextStyle {
                    font_size: Some("96px".to_string()),
                    font_weight: Some("bold".to_string()),
                    text_align: Some(TextAlign::Center),
                    brand: BrandBindings {
                        color: Some(BrandColorRole::Primary),
                        font: true,
                    },
                    ..TextStyle::default()
                },
                config: TextConfig {
                    field_id: "title".to_string(),
                    label: Some("Company name".to_string()),
                    placeholder: Some("Your Company".to_string()),
                    required: true,
                    ..TextConfig::default()
                },
            },
            position: Position::new(360.0, 400.0),
            size: Size::fixed(1200.0, 140.0),
            z_index: 2,
        },
        ElementSeed {
            kind: ElementKind::Text {
                style: TextStyle {
                    font_size: Some("32px".to_string()),
                    color: Some("#6B7280".to_string()),
                    text_align: Some(TextAlign::Center),
                    ..TextStyle::default()
                },
                config: TextConfig {
                    field_id: "tagline".to_string(),
                    label: Some("Tagline".to_string()),
                    placeholder: Some("One sentence on what you do".to_string()),
                    ..TextConfig::default()
                },
            },
            position: Position::new(460.0, 580.0),
            size: Size::auto_height(1000.0),
            z_index: 3,
        },
    ];

    Template::new("Title Slide", "title", TemplateLayout::Visual { seeds })
}

/// Problem slide: legacy schema-only template, layout synthesized.
fn problem_template() -> Template {
    Template::new(
        "Problem",
        "problem",
        TemplateLayout::Legacy {
            schema: vec![
                ContentField {
                    field_id: "title".to_string(),
                    label: "Title".to_string(),
                    kind: FieldKind::Text,
                    required: true,
                },
                ContentField {
                    field_id: "pain".to_string(),
                    label: "The pain today".to_string(),
                    kind: FieldKind::Multiline,
                    required: true,
                },
                ContentField {
                    field_id: "cost".to_string(),
                    label: "What it costs the market".to_string(),
                    kind: FieldKind::Multiline,
                    required: false,
                },
            ],
        },
    )
}

/// Traction slide: premium visual template with data-bound metrics.
fn traction_template() -> Template {
    let metric = |field: &str, path: &str, format: DataFormat, x: f32| ElementSeed {
        kind: ElementKind::Data {
            style: TextStyle {
                font_size: Some("64px".to_string()),
                font_weight: Some("bold".to_string()),
                text_align: Some(TextAlign::Center),
                brand: BrandBindings::color(BrandColorRole::Accent),
                ..TextStyle::default()
            },
            config: DataConfig {
                field_id: field.to_string(),
                data_path: path.to_string(),
                format,
                prefix: None,
                suffix: None,
            },
        },
        position: Position::new(x, 420.0),
        size: Size::fixed(480.0, 100.0),
        z_index: 1,
    };

    let mut styling = HashMap::new();
    styling.insert(
        "title".to_string(),
        SlotStyling {
            font_size: Some("56px".to_string()),
            font_weight: Some("bold".to_string()),
            ..SlotStyling::default()
        },
    );

    Template::new(
        "Traction Metrics",
        "traction",
        TemplateLayout::Visual {
            seeds: vec![
                ElementSeed {
                    kind: ElementKind::Text {
                        style: TextStyle::default(),
                        config: TextConfig {
                            field_id: "title".to_string(),
                            label: Some("Title".to_string()),
                            placeholder: Some("Traction".to_string()),
                            required: true,
                            ..TextConfig::default()
                        },
                    },
                    position: Position::new(120.0, 100.0),
                    size: Size::fixed(1200.0, 90.0),
                    z_index: 0,
                },
                metric("arr", "financials.arr", DataFormat::Currency, 120.0),
                metric("growth", "financials.growth", DataFormat::Percentage, 720.0),
                metric("customers", "traction.customers", DataFormat::Number, 1320.0),
            ],
        },
    )
    .with_access_tier(AccessTier::Premium)
    .with_styling(styling)
}
