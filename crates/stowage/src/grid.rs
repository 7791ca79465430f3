//! # Grid view
//!
//! Arranges a composed name list into rows for operator review. Only `Grid`
//! and `ThreeDGrid` schemes get a view; layers of a 3D grid are stacked
//! vertically with a `--- Level {depth} ---` label row between them.

use crate::{Axis, GenerationScheme, LocationType, resolved_len};

/// Builds the display matrix for `names`, which must come from
/// [`compose`](crate::compose) on the same `scheme`.
///
/// Cells past the end of `names` are omitted rather than padded. A layer
/// with no rows or no columns contributes nothing.
pub fn build_grid_view(scheme: &GenerationScheme, names: &[String]) -> Vec<Vec<String>> {
    let (rows, cols, depths) = match scheme.kind {
        LocationType::Single | LocationType::Row => return Vec::new(),
        LocationType::Grid => (axis_len(scheme, Axis::Row), axis_len(scheme, Axis::Column), 1),
        LocationType::ThreeDGrid => (
            axis_len(scheme, Axis::Row),
            axis_len(scheme, Axis::Column),
            axis_len(scheme, Axis::Depth),
        ),
    };
    let layer_size = rows.saturating_mul(cols);
    if layer_size == 0 || depths == 0 {
        return Vec::new();
    }

    let mut view = Vec::new();
    for depth in 0..depths {
        let offset = depth.saturating_mul(layer_size);
        if offset >= names.len() {
            break;
        }
        if depth > 0 {
            view.push(vec![format!("--- Level {depth} ---")]);
        }
        let layer = &names[offset..names.len().min(offset.saturating_add(layer_size))];
        view.extend(layer.chunks(cols).map(<[String]>::to_vec));
    }
    view
}

fn axis_len(scheme: &GenerationScheme, axis: Axis) -> usize {
    scheme
        .dimension(axis)
        .map_or(0, |spec| usize::try_from(resolved_len(spec)).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DimensionSpec, compose};

    fn view(scheme: &GenerationScheme) -> Vec<Vec<String>> {
        build_grid_view(scheme, &compose(scheme))
    }

    #[test]
    fn single_and_row_have_no_view() {
        assert!(view(&GenerationScheme::single("x")).is_empty());
        assert!(view(&GenerationScheme::row("x", DimensionSpec::numbers(1, 3))).is_empty());
    }

    #[test]
    fn grid_rows_follow_dim1() {
        let scheme = GenerationScheme::grid(
            "",
            DimensionSpec::numbers(1, 2),
            DimensionSpec::letters('A', 'B'),
        )
        .with_separators("-", "");
        assert_eq!(view(&scheme), [["1-A", "1-B"], ["2-A", "2-B"]]);
    }

    #[test]
    fn grid_with_single_column() {
        let scheme = GenerationScheme::grid(
            "",
            DimensionSpec::letters('a', 'c'),
            DimensionSpec::numbers(5, 5),
        );
        assert_eq!(view(&scheme), [["a5"], ["b5"], ["c5"]]);
    }

    #[test]
    fn three_d_grid_labels_every_layer_after_the_first() {
        let scheme = GenerationScheme::three_d_grid(
            "",
            DimensionSpec::letters('A', 'A'),
            DimensionSpec::letters('A', 'A'),
            DimensionSpec::numbers(1, 2),
        )
        .with_separators("-", "-");
        assert_eq!(
            view(&scheme),
            [
                vec!["A-A-1".to_string()],
                vec!["--- Level 1 ---".to_string()],
                vec!["A-A-2".to_string()],
            ]
        );
    }

    #[test]
    fn three_d_grid_layers_slice_the_flat_list() {
        let scheme = GenerationScheme::three_d_grid(
            "",
            DimensionSpec::numbers(1, 2),
            DimensionSpec::letters('a', 'c'),
            DimensionSpec::numbers(1, 3),
        );
        let names = compose(&scheme);
        let grid = build_grid_view(&scheme, &names);

        // 3 layers of 2 rows, plus 2 label rows
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0], ["1a1", "1b1", "1c1"]);
        assert_eq!(grid[1], ["2a1", "2b1", "2c1"]);
        assert_eq!(grid[2], ["--- Level 1 ---"]);
        assert_eq!(grid[3], ["1a2", "1b2", "1c2"]);
        assert_eq!(grid[5], ["--- Level 2 ---"]);
        assert_eq!(grid[7], ["2a3", "2b3", "2c3"]);

        let cells: Vec<&String> = grid
            .iter()
            .filter(|row| !row[0].starts_with("---"))
            .flatten()
            .collect();
        assert_eq!(cells, names.iter().collect::<Vec<_>>());
    }

    #[test]
    fn short_name_list_truncates_last_row() {
        let scheme = GenerationScheme::grid(
            "",
            DimensionSpec::numbers(1, 2),
            DimensionSpec::numbers(1, 3),
        );
        let names: Vec<String> = compose(&scheme).into_iter().take(4).collect();
        assert_eq!(
            build_grid_view(&scheme, &names),
            [vec!["11", "12", "13"], vec!["21"]]
        );
    }

    #[test]
    fn empty_dimension_yields_empty_view() {
        let mut scheme = GenerationScheme::grid(
            "",
            DimensionSpec::numbers(1, 2),
            DimensionSpec::numbers(1, 3),
        );
        scheme.dim2 = None;
        assert!(view(&scheme).is_empty());
    }
}
