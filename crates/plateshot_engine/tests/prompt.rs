use plateshot_core::PhotoStyle;
use plateshot_engine::{build_prompt, style_policy};
use pretty_assertions::assert_eq;

#[test]
fn aspect_ratio_per_style() {
    assert_eq!(style_policy(PhotoStyle::Rustic).aspect_ratio, "4:3");
    assert_eq!(style_policy(PhotoStyle::Modern).aspect_ratio, "4:3");
    assert_eq!(style_policy(PhotoStyle::Social).aspect_ratio, "1:1");
}

#[test]
fn prompt_combines_dish_and_style_template() {
    let prompt = build_prompt("Caesar Salad", "fresh greens", PhotoStyle::Rustic);
    assert_eq!(
        prompt,
        "Professional food photography of Caesar Salad: fresh greens. Rustic style, dark moody \
         lighting, wooden table texture, professional food photography, 85mm lens, f/1.8, \
         cinematic lighting, rich details. Make it look appetizing and high-end."
    );
}

#[test]
fn each_style_has_its_own_template() {
    let modern = build_prompt("Soup", "", PhotoStyle::Modern);
    assert!(modern.starts_with("Professional food photography of Soup: . Bright and modern style"));
    assert!(modern.contains("clean white marble background"));

    let social = build_prompt("Soup", "", PhotoStyle::Social);
    assert!(social.contains("Social media aesthetic"));
    assert_ne!(modern, social);
}
