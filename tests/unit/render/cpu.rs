use super::*;
use crate::content::sign::Sign;

fn small() -> Canvas {
    Canvas {
        width: 64,
        height: 48,
    }
}

#[test]
fn clear_fills_every_pixel_with_the_background() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let plan = FramePlan::cleared(Rgba8::rgb(10, 20, 30));
    let frame = be.render_plan(&plan, &ReelAssets::empty()).unwrap();
    assert_eq!((frame.width, frame.height), (64, 48));
    assert_eq!(frame.data.len(), 64 * 48 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(63, 47), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(64, 0), None);
}

#[test]
fn fill_rect_respects_geometry() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 32.0, 48.0),
        color: Rgba8::WHITE,
        opacity: 1.0,
    });
    let frame = be.render_plan(&plan, &ReelAssets::empty()).unwrap();
    assert_eq!(frame.pixel(10, 10), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(50, 10), Some([0, 0, 0, 255]));
}

#[test]
fn zero_opacity_draws_nothing() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 64.0, 48.0),
        color: Rgba8::WHITE,
        opacity: 0.0,
    });
    let frame = be.render_plan(&plan, &ReelAssets::empty()).unwrap();
    assert_eq!(frame.pixel(32, 24), Some([0, 0, 0, 255]));
}

#[test]
fn clip_limits_painting_to_the_reveal_rect() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::PushClip(Rect::new(0.0, 0.0, 16.0, 48.0)));
    plan.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 64.0, 48.0),
        color: Rgba8::WHITE,
        opacity: 1.0,
    });
    plan.push(DrawOp::PopClip);
    let frame = be.render_plan(&plan, &ReelAssets::empty()).unwrap();
    assert_eq!(frame.pixel(4, 24), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(40, 24), Some([0, 0, 0, 255]));
}

#[test]
fn unbalanced_pop_is_a_render_error() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::PopClip);
    let err = be.render_plan(&plan, &ReelAssets::empty()).unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
    // The backend stays usable.
    be.render_plan(&FramePlan::cleared(Rgba8::BLACK), &ReelAssets::empty())
        .unwrap();
}

#[test]
fn images_are_scaled_into_their_rect_and_missing_ones_skipped() {
    let assets =
        ReelAssets::empty().with_sign(Sign::Leo, PreparedImage::solid(4, 4, [255, 0, 0, 255]));
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::Image {
        image: ImageRef::Sign(Sign::Leo),
        rect: Rect::new(8.0, 8.0, 24.0, 24.0),
        rotation_deg: 0.0,
        opacity: 1.0,
    });
    plan.push(DrawOp::Image {
        image: ImageRef::Sign(Sign::Aries),
        rect: Rect::new(40.0, 8.0, 56.0, 24.0),
        rotation_deg: 0.0,
        opacity: 1.0,
    });
    let frame = be.render_plan(&plan, &assets).unwrap();
    assert_eq!(frame.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(48, 16), Some([0, 0, 0, 255]));
}

#[test]
fn reused_backend_paints_the_current_assets_pixels() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::Image {
        image: ImageRef::Sign(Sign::Leo),
        rect: Rect::new(0.0, 0.0, 64.0, 48.0),
        rotation_deg: 0.0,
        opacity: 1.0,
    });
    for i in 0..20 {
        let rgba = if i % 2 == 0 {
            [255, 0, 0, 255]
        } else {
            [0, 0, 255, 255]
        };
        let assets = ReelAssets::empty().with_sign(Sign::Leo, PreparedImage::solid(4, 4, rgba));
        let frame = be.render_plan(&plan, &assets).unwrap();
        assert_eq!(frame.pixel(32, 24), Some(rgba), "iteration {i}");
    }
}

#[test]
fn text_without_a_font_is_skipped() {
    let mut be = CpuBackend::new(small(), None).unwrap();
    let mut plan = FramePlan::cleared(Rgba8::BLACK);
    plan.push(DrawOp::Text {
        text: "LEO".to_owned(),
        style: crate::layout::measure::TextStyle::new(
            20.0,
            crate::layout::measure::FontWeight::Bold,
            Rgba8::WHITE,
        ),
        pos: crate::foundation::core::Point::new(32.0, 24.0),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        max_width: None,
        opacity: 1.0,
    });
    let frame = be.render_plan(&plan, &ReelAssets::empty()).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn oversized_surface_is_rejected() {
    let err = CpuBackend::new(
        Canvas {
            width: 70_000,
            height: 10,
        },
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
}
