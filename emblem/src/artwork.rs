//! The drawings behind every glyph.
//!
//! All coordinates are in the 512x512 design space, see [render::DESIGN_SIZE].
//! Glyphs are drawn back to front: drop shadow, outline, fill, highlight.

use math::{Color, Rectangle, Vec2D};
use render::{Composition, Polygon, Shape, Source, Theme};

use crate::catalog::Glyph;

/// How far drop shadows are offset from the shape that casts them
const SHADOW_OFFSET: Vec2D = Vec2D::new(7., 7.);

const HIGHLIGHT: Color = Color::rgba(255, 255, 255, 96);

fn rect(left: f64, top: f64, right: f64, bottom: f64) -> Rectangle {
    Rectangle::from_corners(Vec2D::new(left, top), Vec2D::new(right, bottom))
}

fn rounded_rect(left: f64, top: f64, width: f64, height: f64, radius: f64) -> Shape {
    Shape::RoundedRectangle {
        position: Vec2D::new(left, top),
        width,
        height,
        radius,
    }
}

fn circle(x: f64, y: f64, radius: f64) -> Shape {
    Shape::Circle {
        center: Vec2D::new(x, y),
        radius,
    }
}

fn polygon(points: &[(f64, f64)]) -> Polygon {
    points.iter().copied().collect()
}

fn gradient(top: Color, bottom: Color) -> Source {
    Source::VerticalGradient { top, bottom }
}

/// The glyph on top of its badge
#[must_use]
pub fn composition_for(glyph: Glyph, theme: &Theme) -> Composition {
    let mut composition = badge_base(theme);

    let glyph_layers = match glyph {
        Glyph::Ten => ten(theme),
        Glyph::J => j(theme),
        Glyph::Q => q(theme),
        Glyph::K => k(),
        Glyph::A => a(theme),
        Glyph::Star => star(theme),
        Glyph::Scatter => scatter(),
        Glyph::Wild => wild(theme),
    };
    composition.extend(glyph_layers);

    log::debug!(
        "{glyph} consists of {} layers",
        composition.layers().len()
    );
    composition
}

/// The rounded panel that every glyph sits on
#[must_use]
pub fn badge_base(theme: &Theme) -> Composition {
    let (x, y, w, h, r) = (48., 34., 416., 444., 86.);
    let mut base = Composition::new();

    // Drop shadows
    base.add_layer(
        rounded_rect(x + 10., y + 14., w, h, r),
        Color::rgba(0, 0, 0, 68),
    )
    .add_layer(
        rounded_rect(x + 14., y + 18., w, h, r),
        Color::rgba(0, 0, 0, 34),
    );

    // Outer rim and inner panel
    base.add_layer(
        rounded_rect(x, y, w, h, r),
        gradient(theme.outer_top, theme.outer_bottom),
    )
    .add_layer(
        rounded_rect(x + 10., y + 10., w - 20., h - 20., r - 10.),
        gradient(theme.inner_top, theme.inner_bottom),
    );

    base.add_layer(
        Shape::Glow {
            center: Vec2D::new(x + w * 0.5, y + h * 0.48),
            radius: 162.,
        },
        theme.glow.with_alpha(90),
    );

    // Gloss on the upper part, shade on the lower one
    base.add_layer(
        rounded_rect(x + 18., y + 20., w - 36., h * 0.38, r - 18.),
        gradient(
            Color::rgba(255, 255, 255, 86),
            Color::rgba(255, 255, 255, 0),
        ),
    )
    .add_layer(
        rounded_rect(x + 14., y + h * 0.56, w - 28., h * 0.34, r - 14.),
        gradient(Color::rgba(0, 0, 0, 0), Color::rgba(0, 0, 0, 78)),
    );

    // Sparkles
    for (sparkle_x, sparkle_y) in [
        (x + 74., y + 88.),
        (x + w - 88., y + 108.),
        (x + w - 68., y + h - 100.),
    ] {
        base.add_layer(
            circle(sparkle_x, sparkle_y, 8.),
            Color::rgba(255, 255, 255, 80),
        );
    }

    base
}

fn ten(theme: &Theme) -> Composition {
    let main = Color::rgb(248, 236, 184);
    let stroke = Color::rgb(156, 118, 44);
    let shadow = Color::rgba(0, 0, 0, 138);
    let hole = theme.inner_bottom.darken(0.28);

    let mut layers = Composition::new();
    layers
        .add_layer(rect(146., 122., 198., 376.).offset_by(SHADOW_OFFSET), shadow)
        .add_layer(circle(313., 253., 93.), shadow)
        .add_layer(rect(146., 122., 198., 376.), stroke)
        .add_layer(rect(130., 140., 194., 182.), stroke)
        .add_layer(circle(306., 246., 93.), stroke)
        .add_layer(rect(154., 130., 190., 368.), main)
        .add_layer(rect(138., 148., 186., 174.), main)
        .add_layer(circle(306., 246., 82.), main)
        .add_layer(circle(306., 246., 45.), hole)
        .add_layer(circle(280., 220., 22.), HIGHLIGHT);
    layers
}

fn j(theme: &Theme) -> Composition {
    let main = Color::rgb(227, 242, 255);
    let stroke = Color::rgb(86, 127, 201);
    let shadow = Color::rgba(0, 0, 0, 136);
    let hole = theme.inner_bottom.darken(0.24);

    let stem = rect(286., 118., 344., 320.);
    let hook = rect(206., 300., 344., 354.);

    let mut layers = Composition::new();
    layers
        .add_layer(stem.offset_by(SHADOW_OFFSET), shadow)
        .add_layer(hook.offset_by(SHADOW_OFFSET), shadow)
        .add_layer(circle(225., 307., 57.), shadow)
        .add_layer(stem, stroke)
        .add_layer(hook, stroke)
        .add_layer(circle(218., 300., 57.), stroke)
        .add_layer(rect(295., 127., 335., 312.), main)
        .add_layer(rect(215., 309., 335., 345.), main)
        .add_layer(circle(218., 300., 46.), main)
        .add_layer(circle(218., 300., 26.), hole)
        .add_layer(circle(244., 228., 24.), HIGHLIGHT);
    layers
}

fn q(theme: &Theme) -> Composition {
    let main = Color::rgb(248, 218, 114);
    let stroke = Color::rgb(168, 112, 34);
    let shadow = Color::rgba(0, 0, 0, 138);
    let hole = theme.inner_bottom.darken(0.24);

    let tail = polygon(&[(300., 300.), (378., 388.), (334., 410.), (258., 324.)]);

    let mut layers = Composition::new();
    layers
        .add_layer(circle(263., 239., 100.), shadow)
        .add_layer(tail.translate(SHADOW_OFFSET), shadow)
        .add_layer(circle(256., 232., 100.), stroke)
        .add_layer(tail, stroke)
        .add_layer(circle(256., 232., 88.), main)
        .add_layer(circle(256., 232., 49.), hole)
        .add_layer(
            polygon(&[(304., 304.), (366., 380.), (336., 394.), (274., 318.)]),
            main,
        )
        .add_layer(circle(228., 204., 22.), HIGHLIGHT);
    layers
}

fn k() -> Composition {
    let main = Color::rgb(255, 236, 244);
    let stroke = Color::rgb(171, 88, 123);
    let shadow = Color::rgba(0, 0, 0, 142);
    let highlight = Color::rgba(255, 255, 255, 88);

    let stem = rect(148., 116., 206., 390.);
    let upper_arm = polygon(&[(210., 252.), (368., 112.), (398., 152.), (252., 290.)]);
    let lower_arm = polygon(&[(208., 248.), (398., 390.), (360., 430.), (250., 296.)]);

    let mut layers = Composition::new();
    layers
        .add_layer(stem.offset_by(SHADOW_OFFSET), shadow)
        .add_layer(upper_arm.translate(SHADOW_OFFSET), shadow)
        .add_layer(lower_arm.translate(SHADOW_OFFSET), shadow)
        .add_layer(stem, stroke)
        .add_layer(upper_arm, stroke)
        .add_layer(lower_arm, stroke)
        .add_layer(rect(157., 125., 197., 381.), main)
        .add_layer(
            polygon(&[(220., 252.), (358., 128.), (382., 160.), (258., 278.)]),
            main,
        )
        .add_layer(
            polygon(&[(218., 258.), (382., 382.), (352., 414.), (258., 298.)]),
            main,
        )
        .add_layer(circle(238., 194., 22.), highlight);
    layers
}

fn a(theme: &Theme) -> Composition {
    let main = Color::rgb(255, 240, 216);
    let stroke = Color::rgb(183, 122, 52);
    let shadow = Color::rgba(0, 0, 0, 140);
    let hole = theme.inner_bottom.darken(0.24);
    let highlight = Color::rgba(255, 255, 255, 88);

    let outline = polygon(&[(256., 98.), (378., 394.), (134., 394.)]);

    let mut layers = Composition::new();
    layers
        .add_layer(outline.translate(SHADOW_OFFSET), shadow)
        .add_layer(outline, stroke)
        .add_layer(polygon(&[(256., 176.), (320., 338.), (192., 338.)]), hole)
        .add_layer(rect(186., 262., 326., 306.), stroke)
        .add_layer(polygon(&[(256., 112.), (364., 384.), (148., 384.)]), main)
        .add_layer(polygon(&[(256., 190.), (308., 332.), (204., 332.)]), hole)
        .add_layer(rect(194., 270., 318., 298.), main)
        .add_layer(circle(248., 182., 21.), highlight);
    layers
}

fn star(theme: &Theme) -> Composition {
    let center = Vec2D::new(256., 236.);
    let shadow = Color::rgba(0, 0, 0, 146);
    let stroke = Color::rgb(174, 126, 26);
    let main = Color::rgb(254, 224, 120);
    let inner = Color::rgb(255, 243, 187);

    let mut layers = Composition::new();
    layers
        .add_layer(
            circle(center.x, center.y, 126.),
            theme.accent.lighten(0.35).with_alpha(72),
        )
        .add_layer(
            circle(center.x + SHADOW_OFFSET.x, center.y + SHADOW_OFFSET.y, 92.),
            shadow,
        )
        .add_layer(Polygon::star(center + SHADOW_OFFSET, 118., 49., 5), shadow)
        .add_layer(Polygon::star(center, 118., 49., 5), stroke)
        .add_layer(Polygon::star(center, 108., 44., 5), main)
        .add_layer(Polygon::star(center, 62., 25., 5), inner)
        .add_layer(
            circle(center.x - 28., center.y - 30., 20.),
            Color::rgba(255, 255, 255, 108),
        );
    layers
}

fn scatter() -> Composition {
    let shadow = Color::rgba(0, 0, 0, 136);
    let outline = Color::rgb(18, 112, 148);
    let gems = [
        (200., 292., 70., Color::rgb(76, 220, 252)),
        (286., 220., 76., Color::rgb(129, 241, 255)),
        (334., 318., 66., Color::rgb(40, 188, 226)),
    ];

    let mut layers = Composition::new();
    for (x, y, r, color) in gems {
        let facet = polygon(&[
            (x - r * 0.40, y - r * 0.06),
            (x + r * 0.02, y - r * 0.42),
            (x + r * 0.34, y),
            (x - r * 0.02, y + r * 0.34),
        ]);

        layers
            .add_layer(circle(x + SHADOW_OFFSET.x, y + SHADOW_OFFSET.y, r), shadow)
            .add_layer(circle(x, y, r), outline)
            .add_layer(circle(x, y, r - 8.), color)
            .add_layer(
                circle(x - r * 0.28, y - r * 0.30, r * 0.26),
                Color::rgba(255, 255, 255, 105),
            )
            .add_layer(facet, Color::rgba(255, 255, 255, 64));
    }

    // Twinkles, each one a horizontal and a vertical bar
    let twinkle = Color::rgba(255, 255, 255, 165);
    for (x, y, size) in [(122., 146., 20.), (372., 142., 18.), (394., 386., 16.)] {
        layers
            .add_layer(rect(x - size, y - 2., x + size, y + 2.), twinkle)
            .add_layer(rect(x - 2., y - size, x + 2., y + size), twinkle);
    }
    layers
}

fn wild(theme: &Theme) -> Composition {
    let fill = Color::rgb(255, 247, 228);
    let stroke = Color::rgb(201, 110, 194);
    let shadow = Color::rgba(0, 0, 0, 144);
    let hole = theme.inner_bottom.darken(0.22);

    let w_outline = polygon(&[
        (98., 142.),
        (142., 382.),
        (184., 236.),
        (224., 382.),
        (268., 142.),
        (230., 142.),
        (184., 316.),
        (138., 142.),
    ]);
    let w_fill = polygon(&[
        (110., 154.),
        (146., 368.),
        (184., 252.),
        (220., 368.),
        (256., 154.),
        (228., 154.),
        (184., 300.),
        (140., 154.),
    ]);
    let i_stem = rect(280., 142., 322., 382.);
    let l_stem = rect(338., 142., 380., 382.);
    let d_stem = rect(360., 142., 394., 382.);

    let mut layers = Composition::new();
    layers
        .add_layer(w_outline.translate(SHADOW_OFFSET), shadow)
        .add_layer(w_outline, stroke)
        .add_layer(w_fill, fill);

    layers
        .add_layer(i_stem.offset_by(SHADOW_OFFSET), shadow)
        .add_layer(i_stem, stroke)
        .add_layer(rect(288., 150., 314., 374.), fill);

    layers
        .add_layer(l_stem.offset_by(SHADOW_OFFSET), shadow)
        .add_layer(l_stem, stroke)
        .add_layer(rect(346., 150., 372., 374.), fill)
        .add_layer(rect(346., 340., 408., 374.), fill);

    layers
        .add_layer(d_stem.offset_by(SHADOW_OFFSET), shadow)
        .add_layer(d_stem, stroke)
        .add_layer(rect(367., 150., 387., 374.), fill)
        .add_layer(circle(392., 262., 70.), stroke)
        .add_layer(circle(392., 262., 61.), fill)
        .add_layer(circle(392., 262., 34.), hole);

    // Lightning bolt across the letters
    layers.add_layer(
        polygon(&[
            (246., 134.),
            (214., 220.),
            (252., 220.),
            (216., 326.),
            (298., 212.),
            (258., 212.),
            (288., 134.),
        ]),
        Color::rgba(255, 216, 90, 220),
    );
    layers
}

#[cfg(test)]
mod tests {
    use render::{render_icon, RenderConfig};

    use super::*;

    #[test]
    fn test_badge_base_layers() {
        let theme = Theme::from_accent(Glyph::A.accent());
        let base = badge_base(&theme);

        // 2 shadows, 2 panels, glow, gloss, shade, 3 sparkles
        assert_eq!(base.layers().len(), 10);
        assert_eq!(
            base.layers()[2].source,
            gradient(theme.outer_top, theme.outer_bottom)
        );
    }

    #[test]
    fn test_every_glyph_adds_layers() {
        for glyph in Glyph::ALL {
            let theme = Theme::from_accent(glyph.accent());
            let base_layers = badge_base(&theme).layers().len();

            assert!(composition_for(glyph, &theme).layers().len() > base_layers);
        }
    }

    #[test]
    fn test_rendered_badge() {
        let config = RenderConfig::new(64, 2);

        for glyph in Glyph::ALL {
            let theme = Theme::from_accent(glyph.accent());
            let texture = render_icon(&config, &composition_for(glyph, &theme));

            assert_eq!(texture.width(), 64);
            assert_eq!(texture.height(), 64);

            // The badge leaves the corners empty and covers the center
            assert_eq!(texture.get_pixel(0, 0), Color::TRANSPARENT);
            assert_eq!(texture.get_pixel(63, 0), Color::TRANSPARENT);
            assert_eq!(texture.get_pixel(32, 32).alpha(), 255);
        }
    }

    #[test]
    fn test_full_size_reference_pixels() {
        let config = RenderConfig::default();
        let cases = [
            (
                Glyph::J,
                [
                    ((238, 198), Color::rgba(121, 166, 222, 255)),
                    ((273, 198), Color::rgba(121, 166, 222, 255)),
                    ((256, 256), Color::rgba(117, 162, 216, 255)),
                    ((100, 400), Color::rgba(53, 86, 126, 255)),
                    ((60, 60), Color::TRANSPARENT),
                    ((300, 120), Color::rgba(86, 127, 201, 255)),
                ],
            ),
            (
                Glyph::Wild,
                [
                    ((238, 198), Color::rgba(255, 220, 109, 255)),
                    ((273, 198), Color::rgba(210, 137, 221, 255)),
                    ((256, 256), Color::rgba(248, 205, 107, 255)),
                    ((100, 400), Color::rgba(118, 65, 126, 255)),
                    ((60, 60), Color::TRANSPARENT),
                    ((300, 120), Color::rgba(226, 161, 237, 255)),
                ],
            ),
        ];

        for (glyph, pixels) in cases {
            let theme = Theme::from_accent(glyph.accent());
            let texture = render_icon(&config, &composition_for(glyph, &theme));

            for ((x, y), expected) in pixels {
                assert_eq!(texture.get_pixel(x, y), expected, "{glyph:?} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_glyphs_look_different() {
        let config = RenderConfig::new(48, 1);
        let theme = Theme::from_accent(Color::rgb(128, 128, 128));

        let textures: Vec<_> = Glyph::ALL
            .into_iter()
            .map(|glyph| render_icon(&config, &composition_for(glyph, &theme)))
            .collect();

        for (i, first) in textures.iter().enumerate() {
            for second in &textures[i + 1..] {
                assert_ne!(first, second);
            }
        }
    }
}
