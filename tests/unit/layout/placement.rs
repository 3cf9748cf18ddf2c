use super::*;

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[test]
fn placement_is_deterministic() {
    for t in Template::ALL {
        for i in 0..t.required_count() {
            let a = placement(t, i, t.canvas(), 7);
            let b = placement(t, i, t.canvas(), 7);
            assert_eq!(a, b, "{t} slot {i}");
        }
    }
}

#[test]
fn strip_stacks_three_rows_with_margins() {
    let canvas = Template::Strip.canvas();
    let rects = placements(Template::Strip, canvas, 4);
    assert_eq!(rects.len(), 3);
    let h = (2400.0 - 32.0) / 3.0;
    for (i, r) in rects.iter().enumerate() {
        assert_eq!(r.x0, 8.0);
        assert_eq!(r.width(), 1600.0 - 16.0);
        assert!((r.height() - h).abs() < 1e-9);
        assert!((r.y0 - (8.0 + i as f64 * (h + 8.0))).abs() < 1e-9);
    }
    assert!((rects[2].y1 - (2400.0 - 8.0)).abs() < 1e-9);
}

#[test]
fn grid_is_two_by_two_and_disjoint() {
    let canvas = Template::Grid.canvas();
    let rects = placements(Template::Grid, canvas, 5);
    let w = (1600.0 - 30.0) / 2.0;
    assert_eq!(rects[0], Rect::from_origin_size((10.0, 10.0), (w, w)));
    assert_eq!(rects[1].x0, 10.0 + w + 10.0);
    assert_eq!(rects[1].y0, 10.0);
    assert_eq!(rects[2].x0, 10.0);
    assert_eq!(rects[2].y0, 10.0 + w + 10.0);
    assert_eq!(rects[3].x1, 1590.0);
    assert_eq!(rects[3].y1, 1590.0);
    for i in 0..4 {
        for j in (i + 1)..4 {
            assert!(!overlaps(rects[i], rects[j]), "{i} vs {j}");
        }
    }
}

#[test]
fn collage_splits_left_half_and_right_rows() {
    let canvas = Template::Collage.canvas();
    let rects = placements(Template::Collage, canvas, 10);
    let w = (1600.0 - 60.0) / 2.0;
    assert_eq!(rects[0], Rect::new(20.0, 20.0, 20.0 + w, 1580.0));

    let h = (1600.0 - 60.0) / 2.0;
    assert_eq!(rects[1], Rect::from_origin_size((810.0, 20.0), (w, h)));
    assert_eq!(rects[2], Rect::from_origin_size((810.0, 20.0 + h + 20.0), (w, h)));
    assert_eq!(rects[2].x1, 1580.0);
    assert_eq!(rects[2].y1, 1580.0);
    assert!(!overlaps(rects[0], rects[1]));
    assert!(!overlaps(rects[1], rects[2]));
}

#[test]
fn collage_without_spacing_splits_canvas_in_halves() {
    let rects = placements(Template::Collage, Template::Collage.canvas(), 0);
    assert_eq!(rects[0], Rect::new(0.0, 0.0, 800.0, 1600.0));
    assert_eq!(rects[1], Rect::new(800.0, 0.0, 1600.0, 800.0));
    assert_eq!(rects[2], Rect::new(800.0, 800.0, 1600.0, 1600.0));
}

#[test]
fn single_fills_canvas_minus_margin() {
    let r = placement(Template::Single, 0, Template::Single.canvas(), 20);
    assert_eq!(r, Rect::new(40.0, 40.0, 1560.0, 1560.0));
}

#[test]
fn out_of_range_index_is_invisible() {
    let canvas = Template::Single.canvas();
    assert_eq!(placement(Template::Single, 1, canvas, 0), Rect::ZERO);
    assert_eq!(placement(Template::Grid, 4, canvas, 0), Rect::ZERO);
}

#[test]
fn border_inflates_by_twice_the_width_per_side() {
    let photo = Rect::from_origin_size((100.0, 50.0), (300.0, 200.0));
    let b = border_rect(photo, 3).unwrap();
    assert_eq!(b.x0, 94.0);
    assert_eq!(b.y0, 44.0);
    assert_eq!(b.width(), 312.0);
    assert_eq!(b.height(), 212.0);

    assert!(border_rect(photo, 0).is_none());
    assert!(border_rect(Rect::ZERO, 4).is_none());
}
