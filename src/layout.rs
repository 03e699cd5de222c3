//! Thumbnail width assignment applied when a gallery is created.

use crate::geometry::format_sig;

/// Width percentages for one row of thumbnails.
///
/// Each image gets its natural width over the row's total natural width, so a
/// row of mixed-size images renders at a uniform height and fills its
/// container. Values use the same significant-digit formatting as the zoom
/// transform and are independent of it: resizing the grid never touches an
/// active image's transform.
pub fn row_width_percents(natural_widths: &[f64]) -> Vec<String> {
    let total: f64 = natural_widths.iter().filter(|w| **w > 0.0).sum();
    natural_widths
        .iter()
        .map(|&w| {
            if w > 0.0 && total > 0.0 {
                format!("{}%", format_sig(w / total * 100.0))
            } else {
                "0%".to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_row_widths() {
        let widths = row_width_percents(&[300.0, 700.0, 500.0, 500.0]);
        assert_eq!(widths, vec!["15%", "35%", "25%", "25%"]);
    }

    #[test]
    fn widths_round_to_six_significant_digits() {
        let widths = row_width_percents(&[250.0, 400.0, 300.0, 305.0, 200.0, 970.0]);
        assert_eq!(
            widths,
            vec!["10.3093%", "16.4948%", "12.3711%", "12.5773%", "8.24742%", "40%"]
        );
    }

    #[test]
    fn non_positive_widths_get_zero() {
        assert_eq!(row_width_percents(&[0.0, 100.0]), vec!["0%", "100%"]);
        assert!(row_width_percents(&[]).is_empty());
        assert_eq!(row_width_percents(&[0.0, 0.0]), vec!["0%", "0%"]);
    }
}
