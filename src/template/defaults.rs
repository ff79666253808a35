use crate::{
    foundation::core::Rgba8,
    template::model::{FontSpec, ImageRef, Rotation, Stroke, Template, TextStyle},
};

/// Built-in template table.
///
/// Returned as fresh values so callers own their configuration; nothing here is global state.
pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: "yall-got-any-more-of-them".to_string(),
            name: "Y'all Got Any More of Them".to_string(),
            slug: None,
            image: ImageRef {
                id: "yall-got-any-more-of-them".to_string(),
                width: 600,
                height: 471,
            },
            text_styles: vec![caption(10.0, 10.0, 580.0), caption(10.0, 421.0, 580.0)],
        },
        Template {
            id: "two-buttons".to_string(),
            name: "Two Buttons".to_string(),
            slug: None,
            image: ImageRef {
                id: "two-buttons".to_string(),
                width: 500,
                height: 756,
            },
            text_styles: vec![
                button_label(80.0, 110.0),
                button_label(245.0, 80.0),
                caption(20.0, 675.0, 460.0),
            ],
        },
    ]
}

// White Impact with a black outline.
fn caption(x: f64, y: f64, width: f64) -> TextStyle {
    TextStyle {
        x,
        y,
        width,
        font: FontSpec {
            family: "Impact".to_string(),
            size: 40.0,
            color: Rgba8::WHITE,
        },
        stroke: Some(Stroke {
            radius: 4,
            color: Rgba8::BLACK,
        }),
        rotation: None,
    }
}

fn button_label(x: f64, y: f64) -> TextStyle {
    TextStyle {
        x,
        y,
        width: 100.0,
        font: FontSpec {
            family: "Arial".to_string(),
            size: 20.0,
            color: Rgba8::BLACK,
        },
        stroke: None,
        rotation: Some(Rotation { degrees: -10.0 }),
    }
}
