use engine::Rect;

/// Strict AABB overlap. Rectangles that only share an edge do not collide.
pub(crate) fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect_symmetrically() {
        let player = Rect::new(380.0, 290.0, 30.0, 30.0);
        let enemy = Rect::new(400.0, 300.0, 40.0, 40.0);
        assert!(intersects(&player, &enemy));
        assert!(intersects(&enemy, &player));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&left, &right));
        assert!(!intersects(&right, &left));
        assert!(!intersects(&left, &below));
        assert!(!intersects(&below, &left));
    }

    #[test]
    fn contained_rect_intersects() {
        let arena = Rect::new(250.0, 200.0, 300.0, 200.0);
        let heart = Rect::new(400.0, 300.0, 20.0, 20.0);
        assert!(intersects(&arena, &heart));
        assert!(intersects(&heart, &arena));
    }

    #[test]
    fn separated_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 5.0, 15.0);
        let b = Rect::new(100.0, 100.0, 20.0, 20.0);
        assert!(!intersects(&a, &b));
        assert!(!intersects(&b, &a));
    }
}
