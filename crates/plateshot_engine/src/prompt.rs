use plateshot_core::PhotoStyle;

/// Fixed prompt fragment and framing for one photo style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePolicy {
    pub template: &'static str,
    pub aspect_ratio: &'static str,
}

const RUSTIC: StylePolicy = StylePolicy {
    template: "Rustic style, dark moody lighting, wooden table texture, professional food \
               photography, 85mm lens, f/1.8, cinematic lighting, rich details.",
    aspect_ratio: "4:3",
};

const MODERN: StylePolicy = StylePolicy {
    template: "Bright and modern style, clean white marble background, soft natural daylight, \
               high key photography, minimalist plating, sharp focus.",
    aspect_ratio: "4:3",
};

const SOCIAL: StylePolicy = StylePolicy {
    template: "Social media aesthetic, top-down flat lay view, vibrant pop colors, trendy cafe \
               composition, smartphone photography style, sharp and shareable.",
    aspect_ratio: "1:1",
};

pub fn style_policy(style: PhotoStyle) -> StylePolicy {
    match style {
        PhotoStyle::Rustic => RUSTIC,
        PhotoStyle::Modern => MODERN,
        PhotoStyle::Social => SOCIAL,
    }
}

/// Full generation prompt for one dish.
pub fn build_prompt(name: &str, description: &str, style: PhotoStyle) -> String {
    let policy = style_policy(style);
    format!(
        "Professional food photography of {name}: {description}. {} Make it look appetizing and high-end.",
        policy.template
    )
}
