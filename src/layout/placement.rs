use crate::{
    foundation::core::{Canvas, Rect},
    model::template::Template,
};

/// Rectangle the photo at sequence position `index` occupies on `canvas`.
///
/// Pure function of its inputs. `spacing` is the style spacing; outer margins and gaps are
/// `2 * spacing`. An `index` outside the template's slots yields [`Rect::ZERO`], which draws
/// nothing.
pub fn placement(template: Template, index: usize, canvas: Canvas, spacing: u8) -> Rect {
    if index >= template.required_count() {
        return Rect::ZERO;
    }

    let w_canvas = canvas.width_f64();
    let h_canvas = canvas.height_f64();
    let s = f64::from(spacing);
    let margin = 2.0 * s;

    let (x, y, w, h) = match template {
        Template::Strip => {
            let w = w_canvas - 4.0 * s;
            let h = (h_canvas - 8.0 * s) / 3.0;
            (margin, margin + index as f64 * (h + margin), w, h)
        }
        Template::Grid => {
            let w = (w_canvas - 6.0 * s) / 2.0;
            let h = (h_canvas - 6.0 * s) / 2.0;
            let col = (index % 2) as f64;
            let row = (index / 2) as f64;
            (margin + col * (w + margin), margin + row * (h + margin), w, h)
        }
        Template::Collage => {
            let w = (w_canvas - 6.0 * s) / 2.0;
            if index == 0 {
                (margin, margin, w, h_canvas - 4.0 * s)
            } else {
                let rows = (template.required_count() - 1) as f64;
                let h = (h_canvas - margin * (rows + 1.0)) / rows;
                let slot = (index - 1) as f64;
                (w_canvas / 2.0 + s, margin + slot * (h + margin), w, h)
            }
        }
        Template::Single => (margin, margin, w_canvas - 4.0 * s, h_canvas - 4.0 * s),
    };

    if w <= 0.0 || h <= 0.0 {
        return Rect::ZERO;
    }
    Rect::from_origin_size((x, y), (w, h))
}

/// Placement rectangles for every slot of `template`, in index order.
pub fn placements(template: Template, canvas: Canvas, spacing: u8) -> Vec<Rect> {
    (0..template.required_count())
        .map(|i| placement(template, i, canvas, spacing))
        .collect()
}

/// Border rectangle drawn under a photo placed at `photo` for `border_width = b`.
///
/// The frame extends `2 * b` past every edge, so its size is the photo's plus `4 * b`.
/// Returns `None` when `b == 0` or the photo rectangle is empty.
pub fn border_rect(photo: Rect, border_width: u8) -> Option<Rect> {
    if border_width == 0 || photo.area() <= 0.0 {
        return None;
    }
    let grow = 2.0 * f64::from(border_width);
    Some(photo.inflate(grow, grow))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
