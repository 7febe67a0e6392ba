//! Coordinate-parameter parsing.

use botway_core::Point;

use crate::error::{CommandError, CommandResult};

/// Extract an `(x, y)` pair from a coordinate parameter.
///
/// The accepted shape is two runs of ASCII digits in order, with anything
/// else acting as a separator: `10 20`, `(10, 20)`, `10,20` and even
/// `x=10 y=20` all parse to the same point.  More or fewer than two runs is
/// malformed, so there are no signs and no decimals; the map's coordinate
/// grid is integral as far as text input is concerned.
pub fn parse_coords(text: &str) -> CommandResult<Point> {
    let runs: Vec<&str> = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect();
    let &[x, y] = runs.as_slice() else {
        return Err(CommandError::MalformedCoordinateText { text: text.to_owned() });
    };

    let parse = |run: &str| {
        run.parse::<f64>()
            .map_err(|_| CommandError::MalformedCoordinateText { text: text.to_owned() })
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}
