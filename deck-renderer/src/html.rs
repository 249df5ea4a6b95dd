//! The static renderer: draws a deck as a self-contained HTML fragment for
//! the external document-export pipeline.
//!
//! Every visual value comes from the shared resolver; nothing here computes
//! a style or content value of its own. The renderer takes no interaction
//! state at all - its signature makes selection rings, drag handles, and
//! hover outlines unrepresentable in export output. Each slide is emitted
//! as one absolutely-positioned container with a page-break boundary.

use std::fmt::Write;

use serde::Serialize;

use deck_core::element::{ObjectFit, ShapeKind, TextAlign};
use deck_core::resolve::{resolve_slide, ResolveContext, ResolvedElement, ResolvedText, ResolvedVisual};
use deck_core::slide::{Background, Slide, SlideId};

use crate::error::{RenderError, RenderResult};

/// One slide queued for export, with the ambient context it resolves under.
#[derive(Debug, Clone, Copy)]
pub struct ExportPage<'a> {
    /// The slide to render.
    pub slide: &'a Slide,
    /// Ambient styling/brand/data for the resolver.
    pub ctx: ResolveContext<'a>,
}

/// Page metadata handed to the export collaborator alongside the markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    /// Slide identity.
    pub slide_id: SlideId,
    /// Position among siblings.
    pub order: u32,
    /// Page width in logical units.
    pub width: f32,
    /// Page height in logical units.
    pub height: f32,
}

/// A rendered export: the markup fragment plus per-page metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    /// Self-contained HTML fragment.
    pub html: String,
    /// One entry per slide, in render order.
    pub pages: Vec<PageMetadata>,
}

/// Renders slides to a self-contained HTML fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRenderer;

impl StaticRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render a deck of slides.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyExport`] when no pages are given.
    pub fn render_deck(&self, pages: &[ExportPage<'_>]) -> RenderResult<ExportOutput> {
        if pages.is_empty() {
            return Err(RenderError::EmptyExport);
        }

        let mut html = String::with_capacity(pages.len() * 4096);
        html.push_str("<div class=\"deck\">");
        let mut metadata = Vec::with_capacity(pages.len());

        for page in pages {
            self.render_slide_into(&mut html, page);
            metadata.push(PageMetadata {
                slide_id: page.slide.id,
                order: page.slide.order,
                width: page.slide.canvas.width,
                height: page.slide.canvas.height,
            });
        }

        html.push_str("</div>");
        tracing::debug!(pages = metadata.len(), bytes = html.len(), "deck rendered to markup");
        Ok(ExportOutput {
            html,
            pages: metadata,
        })
    }

    /// Render one slide to its own markup fragment.
    #[must_use]
    pub fn render_slide(&self, page: &ExportPage<'_>) -> String {
        let mut html = String::with_capacity(4096);
        self.render_slide_into(&mut html, page);
        html
    }

    fn render_slide_into(&self, html: &mut String, page: &ExportPage<'_>) {
        let slide = page.slide;
        let background = match &slide.background {
            Background::Color { value } => format!("background:{}", escape_html(value)),
            Background::Image { url } => format!(
                "background-image:url('{}');background-size:cover",
                escape_html(url)
            ),
        };

        // The page-break boundary is what the export pipeline paginates on.
        let _ = write!(
            html,
            "<section class=\"slide\" data-slide-id=\"{}\" style=\"position:relative;overflow:hidden;width:{}px;height:{}px;{background};page-break-after:always\">",
            slide.id, slide.canvas.width, slide.canvas.height,
        );

        for resolved in resolve_slide(slide, &page.ctx) {
            render_element_html(html, &resolved);
        }

        html.push_str("</section>");
    }
}

/// Render a single resolved element as an absolutely positioned box.
fn render_element_html(html: &mut String, resolved: &ResolvedElement) {
    let _ = write!(
        html,
        "<div style=\"position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{}\">",
        resolved.position.x,
        resolved.position.y,
        resolved.size.width,
        resolved.size.height,
        resolved.z_index,
    );

    match &resolved.visual {
        ResolvedVisual::Text(text) | ResolvedVisual::Data(text) => render_text_html(html, text),
        ResolvedVisual::Image(image) => {
            let fit = match image.object_fit {
                ObjectFit::Contain => "contain",
                ObjectFit::Cover => "cover",
                ObjectFit::Fill => "fill",
            };
            match &image.url {
                Some(url) => {
                    let _ = write!(
                        html,
                        "<img src=\"{}\" style=\"width:100%;height:100%;object-fit:{fit};border-radius:{};opacity:{}\" alt=\"\"/>",
                        escape_html(url),
                        escape_html(&image.border_radius),
                        image.opacity,
                    );
                }
                None => {
                    // Unbound image slot: an empty placeholder box keeps
                    // the layout footprint.
                    let _ = write!(
                        html,
                        "<div style=\"width:100%;height:100%;background:#F3F4F6;border:1px dashed #D1D5DB;border-radius:{};opacity:{}\"></div>",
                        escape_html(&image.border_radius),
                        image.opacity,
                    );
                }
            }
        }
        ResolvedVisual::Shape(shape) => {
            let fill = escape_html(&shape.fill);
            let stroke = escape_html(&shape.stroke);
            match shape.kind {
                ShapeKind::Rectangle => {
                    let _ = write!(
                        html,
                        "<div style=\"width:100%;height:100%;background:{fill};border:{}px solid {stroke}\"></div>",
                        shape.stroke_width,
                    );
                }
                ShapeKind::Circle => {
                    let _ = write!(
                        html,
                        "<div style=\"width:100%;height:100%;border-radius:50%;background:{fill};border:{}px solid {stroke}\"></div>",
                        shape.stroke_width,
                    );
                }
                ShapeKind::Line => {
                    let _ = write!(
                        html,
                        "<div style=\"width:100%;height:{}px;margin-top:-{}px;position:relative;top:50%;background:{stroke}\"></div>",
                        shape.stroke_width,
                        shape.stroke_width / 2.0,
                    );
                }
            }
        }
    }

    html.push_str("</div>");
}

fn render_text_html(html: &mut String, text: &ResolvedText) {
    let align = match text.text_align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    };
    let _ = write!(
        html,
        "<div style=\"font-size:{};font-weight:{};color:{};text-align:{align};font-family:{};line-height:1.4\">",
        escape_html(&text.font_size),
        escape_html(&text.font_weight),
        escape_html(&text.color),
        escape_html(&text.font_family),
    );

    if text.multiline {
        let mut first = true;
        for line in text.content.split('\n') {
            if !first {
                html.push_str("<br/>");
            }
            html.push_str(&escape_html(line));
            first = false;
        }
    } else {
        html.push_str(&escape_html(&text.content));
    }

    html.push_str("</div>");
}

/// Escape text for safe embedding in HTML.
fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::element::{
        ElementKind, Position, ShapeConfig, ShapeStyle, Size, TextConfig, TextStyle,
    };

    fn slide_with_text(value: &str) -> Slide {
        let mut slide = Slide::new();
        slide.create_element(
            ElementKind::Text {
                style: TextStyle {
                    color: Some("#112233".to_string()),
                    ..TextStyle::default()
                },
                config: TextConfig {
                    field_id: "headline".to_string(),
                    default_value: Some(value.to_string()),
                    ..TextConfig::default()
                },
            },
            Position::new(100.0, 50.0),
            Size::fixed(400.0, 60.0),
        );
        slide
    }

    #[test]
    fn test_slide_emits_page_break_boundary() {
        let slide = slide_with_text("Hello");
        let page = ExportPage {
            slide: &slide,
            ctx: ResolveContext::default(),
        };

        let output = StaticRenderer::new().render_deck(&[page]).expect("render");
        assert!(output.html.contains("page-break-after:always"));
        assert_eq!(output.pages.len(), 1);
        assert_eq!(output.pages[0].width, 1920.0);
    }

    #[test]
    fn test_resolved_values_reach_markup() {
        let slide = slide_with_text("Series A");
        let page = ExportPage {
            slide: &slide,
            ctx: ResolveContext::default(),
        };

        let html = StaticRenderer::new().render_slide(&page);
        assert!(html.contains("Series A"));
        assert!(html.contains("color:#112233"));
        assert!(html.contains("left:100px"));
        assert!(html.contains("font-size:16px"));
    }

    #[test]
    fn test_content_is_escaped() {
        let slide = slide_with_text("<script>alert('x')</script>");
        let page = ExportPage {
            slide: &slide,
            ctx: ResolveContext::default(),
        };

        let html = StaticRenderer::new().render_slide(&page);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_elements_emit_in_render_order() {
        let mut slide = Slide::new();
        slide.insert(
            deck_core::element::Element::new(ElementKind::Shape {
                style: ShapeStyle {
                    fill: Some("#AAA111".to_string()),
                    ..ShapeStyle::default()
                },
                config: ShapeConfig::default(),
            })
            .with_z_index(10),
        );
        slide.insert(
            deck_core::element::Element::new(ElementKind::Shape {
                style: ShapeStyle {
                    fill: Some("#BBB222".to_string()),
                    ..ShapeStyle::default()
                },
                config: ShapeConfig::default(),
            })
            .with_z_index(1),
        );

        let page = ExportPage {
            slide: &slide,
            ctx: ResolveContext::default(),
        };
        let html = StaticRenderer::new().render_slide(&page);

        let low = html.find("#BBB222").expect("low fill present");
        let high = html.find("#AAA111").expect("high fill present");
        assert!(low < high);
    }

    #[test]
    fn test_empty_export_is_rejected() {
        let result = StaticRenderer::new().render_deck(&[]);
        assert!(matches!(result, Err(RenderError::EmptyExport)));
    }
}
