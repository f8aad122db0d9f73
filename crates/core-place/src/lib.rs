//! Monte-Carlo placement of sprites into blank rectangles (spec.md §4.4).

use rand::Rng;
use rand::seq::IndexedRandom;

use core_blank::BlankFinder;
use core_canvas::{Canvas, Rect};

/// How many random placements to attempt per blank rectangle before giving
/// up on it.
const MAX_TRIES_PER_BLANK: usize = 5;

/// Pick a uniformly random `new_width` x `new_height` sub-rectangle of
/// `rect`. Panics if `rect` is smaller than the requested size in either
/// dimension; callers must only offer rectangles that fit.
pub fn random_subrectangle(
    rect: &Rect,
    new_width: usize,
    new_height: usize,
    rng: &mut impl Rng,
) -> Rect {
    let x_start = rng.random_range(rect.x_start..=(rect.x_end - new_width));
    let y_start = rng.random_range(rect.y_start..=(rect.y_end - new_height));
    Rect::new(x_start, x_start + new_width, y_start, y_start + new_height)
}

/// Drain every blank rectangle `finder` currently knows is safe to fill,
/// largest area first, and try to stamp a randomly chosen, randomly placed
/// sprite from `arts` into each.
///
/// A rectangle that no sprite fits is skipped. Otherwise up to
/// [`MAX_TRIES_PER_BLANK`] random placements are attempted; the first one
/// that lands ends the attempt for that rectangle.
pub fn sprinkle_art(finder: &mut BlankFinder, arts: &[Canvas], rng: &mut impl Rng) {
    let mut fillable = finder.drain_fillable_blanks();
    fillable.sort_by_key(|rect| std::cmp::Reverse(rect.width() * rect.height()));

    for blank in fillable {
        let fittable: Vec<&Canvas> = arts
            .iter()
            .filter(|art| art.width() <= blank.width() && art.height() <= blank.height())
            .collect();
        let Some(_) = fittable.first() else {
            continue;
        };

        for _ in 0..MAX_TRIES_PER_BLANK {
            let art = fittable.choose(rng).expect("checked non-empty above");
            let rect = random_subrectangle(&blank, art.width(), art.height(), rng);
            if finder.try_fill_blank(&rect, art) {
                tracing::trace!(x = rect.x_start, y = rect.y_start, "placed sprite");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_subrectangle_stays_within_bounds() {
        let rect = Rect::new(0, 10, 0, 10);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sub = random_subrectangle(&rect, 3, 2, &mut rng);
            assert_eq!(sub.width(), 3);
            assert_eq!(sub.height(), 2);
            assert!(sub.x_start >= rect.x_start && sub.x_end <= rect.x_end);
            assert!(sub.y_start >= rect.y_start && sub.y_end <= rect.y_end);
        }
    }

    #[test]
    fn random_subrectangle_exact_fit_is_deterministic() {
        let rect = Rect::new(2, 5, 1, 3);
        let mut rng = StdRng::seed_from_u64(1);
        let sub = random_subrectangle(&rect, 3, 2, &mut rng);
        assert_eq!(sub, rect);
    }

    #[test]
    fn sprinkle_art_fills_a_single_large_blank() {
        let mut finder = BlankFinder::new(10, 1, 999);
        finder.add_line("          ");
        finder.end_of_file();

        let sprite = Canvas::from_lines(["XX"]);
        let mut rng = StdRng::seed_from_u64(3);
        sprinkle_art(&mut finder, &[sprite], &mut rng);

        let mut out = Vec::new();
        finder.flush_canvas(&mut out).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("XX"));
    }

    #[test]
    fn sprinkle_art_skips_blanks_no_sprite_fits() {
        let mut finder = BlankFinder::new(10, 1, 999);
        finder.add_line(" ");
        finder.end_of_file();

        let sprite = Canvas::from_lines(["XXXXXXXXXX"]);
        let mut rng = StdRng::seed_from_u64(5);
        // Should not panic even though no rectangle can fit the sprite.
        sprinkle_art(&mut finder, &[sprite], &mut rng);
    }
}
