/*!
 * Tests for basic and extended shape normalization
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use levelgrid::errors::GridError;
use levelgrid::level::{FillSpec, ShapeEnforcement, ShapeNormalizer, ShapeSpec};

use crate::common::rows;

fn shape(row_count: Option<usize>, col_count: Option<usize>, enforcement: ShapeEnforcement) -> ShapeSpec {
    ShapeSpec {
        row_count,
        col_count,
        enforcement,
        legacy_column_fallback: false,
    }
}

#[test]
fn test_normalize_withUnevenRows_shouldPadToLongestRow() {
    let result = ShapeNormalizer::normalize("XXX\nX-\nX", '-').unwrap();
    assert_eq!(result, "XXX\nX--\nX--");
}

#[test]
fn test_normalize_withTrailingFillOnAllRows_shouldConvergeToTracedWidth() {
    // All three rows start at the maximum length, so each round trims all of them
    let result = ShapeNormalizer::normalize("XX--\nXX--\nX---", '-').unwrap();
    assert_eq!(result, "XX\nXX\nX-");
}

#[test]
fn test_normalize_withLongFillTail_shouldTrimOverSeveralRounds() {
    let result = ShapeNormalizer::normalize("X----\nXX\nX", '-').unwrap();
    assert_eq!(result, "X-\nXX\nX-");
}

#[test]
fn test_normalize_withFillInsideRows_shouldOnlyTouchTrailingTiles() {
    let result = ShapeNormalizer::normalize("-X-X\n--", '-').unwrap();
    assert_eq!(result, "-X-X\n----");
}

#[test]
fn test_normalize_withRectangularInput_shouldReturnInputUnchanged() {
    let grid = "XQX\n-X-\nXXX";
    assert_eq!(ShapeNormalizer::normalize(grid, '-').unwrap(), grid);
}

#[test]
fn test_normalize_appliedTwice_shouldBeIdempotent() {
    let samples = ["XXX\nX-\nX", "XX--\nXX--\nX---", "--\n-", "", "Q\n\n-Q--"];
    for sample in samples {
        let once = ShapeNormalizer::normalize(sample, '-').unwrap();
        let twice = ShapeNormalizer::normalize(&once, '-').unwrap();
        assert_eq!(once, twice, "sample {:?}", sample);
    }
}

#[test]
fn test_normalize_withRandomGrids_shouldBeIdempotentAndRectangular() {
    let mut rng = StdRng::seed_from_u64(2024);
    let tiles = ['X', '-', 'Q'];

    for _ in 0..500 {
        let row_count = rng.random_range(1..=6);
        let text = (0..row_count)
            .map(|_| {
                let len = rng.random_range(0..=8);
                (0..len).map(|_| tiles[rng.random_range(0..tiles.len())]).collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        let once = ShapeNormalizer::normalize(&text, '-').unwrap();
        let twice = ShapeNormalizer::normalize(&once, '-').unwrap();
        assert_eq!(once, twice, "input {:?}", text);

        let widths: Vec<usize> = once.split('\n').map(|row| row.chars().count()).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "input {:?}", text);
        assert_eq!(widths.len(), row_count);
    }
}

#[test]
fn test_convergeRows_withNoRows_shouldFailWithEmptyGrid() {
    let result = ShapeNormalizer::converge_rows(Vec::new(), '-', None);
    assert_eq!(result, Err(GridError::EmptyGrid));
}

#[test]
fn test_enforce_withTooManyRows_shouldKeepBottomRows() {
    let spec = shape(Some(3), None, ShapeEnforcement::Rows);
    let result = ShapeNormalizer::enforce("R0\nR1\nR2\nR3\nR4", '\n', &FillSpec::default(), &spec).unwrap();
    assert_eq!(result, "R2\nR3\nR4");
}

#[test]
fn test_enforce_withTooFewRows_shouldPrependFillerRows() {
    let spec = shape(Some(4), None, ShapeEnforcement::Rows);
    let result = ShapeNormalizer::enforce("XX-\nX", '\n', &FillSpec::default(), &spec).unwrap();
    // Rows-only enforcement leaves row widths alone
    assert_eq!(result, "---\n---\nXX-\nX");
}

#[test]
fn test_enforce_withRowsAndLegacyFallback_shouldAlsoConverge() {
    let mut spec = shape(Some(4), None, ShapeEnforcement::Rows);
    spec.legacy_column_fallback = true;

    let result = ShapeNormalizer::enforce("XX-\nX", '\n', &FillSpec::default(), &spec).unwrap();
    assert_eq!(result, "--\n--\nXX\nX-");

    let grounded = ShapeNormalizer::enforce("XX-\nX", '\n', &FillSpec::new('-').with_ground('G'), &spec).unwrap();
    assert_eq!(grounded, "--\n--\nXX\nXG");
}

#[test]
fn test_enforce_withShortLastRowAndGround_shouldPadWithGround() {
    let spec = shape(None, Some(5), ShapeEnforcement::Columns);
    let fill = FillSpec::new('-').with_ground('G');
    let result = ShapeNormalizer::enforce("X\nXX", '\n', &fill, &spec).unwrap();
    assert_eq!(result, "X----\nXXGGG");
}

#[test]
fn test_enforce_withLongRows_shouldTruncateFromRight() {
    let spec = shape(None, Some(5), ShapeEnforcement::Columns);
    let fill = FillSpec::new('-').with_ground('G');
    let result = ShapeNormalizer::enforce("XXXXXXX\nXX\nQQQQQQ", '\n', &fill, &spec).unwrap();
    assert_eq!(result, "XXXXX\nXX---\nQQQQQ");
}

#[test]
fn test_enforce_withBothDimensions_shouldProduceExactShape() {
    let spec = ShapeSpec::exact(3, 4);
    let fill = FillSpec::new('-').with_ground('X');
    let result = ShapeNormalizer::enforce("old\nQ\n-Q-----\nXX", '\n', &fill, &spec).unwrap();
    assert_eq!(result, "Q---\n-Q--\nXXXX");
}

#[test]
fn test_enforce_withColumnsAndLegacyFallback_shouldSkipConvergentPass() {
    let mut spec = shape(None, Some(4), ShapeEnforcement::Columns);
    spec.legacy_column_fallback = true;
    let result = ShapeNormalizer::enforce("XX--\nX", '\n', &FillSpec::default(), &spec).unwrap();
    // The convergent pass would have trimmed the first row to "XX"
    assert_eq!(result, "XX--\nX---");
}

#[test]
fn test_enforce_withNoEnforcementAndGround_shouldGroundLastRow() {
    let spec = ShapeSpec::default();
    let fill = FillSpec::new('-').with_ground('G');
    let result = ShapeNormalizer::enforce("XXXX\nX-\nX", '\n', &fill, &spec).unwrap();
    assert_eq!(result, "XXXX\nX---\nXGGG");
}

#[test]
fn test_enforce_withVerticalBarSeparator_shouldSplitAndRejoinWithIt() {
    let result = ShapeNormalizer::enforce("XX|X", '|', &FillSpec::default(), &ShapeSpec::default()).unwrap();
    assert_eq!(result, "XX|X-");
}

#[test]
fn test_enforce_withMissingDimensions_shouldFailAsConfiguration() {
    let fill = FillSpec::default();
    let invalid = [
        shape(None, Some(3), ShapeEnforcement::Rows),
        shape(Some(3), None, ShapeEnforcement::Columns),
        shape(Some(3), None, ShapeEnforcement::Both),
        shape(Some(0), None, ShapeEnforcement::Rows),
        shape(None, Some(0), ShapeEnforcement::Columns),
    ];

    for spec in invalid {
        let result = ShapeNormalizer::enforce("XX", '\n', &fill, &spec);
        assert!(matches!(result, Err(GridError::Configuration(_))), "shape {:?}", spec);
    }
}

#[test]
fn test_enforceRowCount_withNoRows_shouldUseColumnCountForFiller() {
    let result = ShapeNormalizer::enforce_row_count(Vec::new(), 2, Some(3), '-');
    assert_eq!(result, rows(&["---", "---"]));
}

#[test]
fn test_enforceColumnCount_withGroundAndSingleRow_shouldGroundThatRow() {
    let fill = FillSpec::new('-').with_ground('#');
    let result = ShapeNormalizer::enforce_column_count(rows(&["X"]), 3, &fill);
    assert_eq!(result, rows(&["X##"]));
}
