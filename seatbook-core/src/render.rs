//! Text occupancy map, two seats per row like the bus aisle.

use crate::models::SeatStatus;

const AISLE: &str = "    ";

/// Render seat statuses as a two-column listing.
///
/// Seat `2k+1` sits on the left and `2k+2` on the right. With an odd capacity the last
/// row holds a single seat.
///
/// Example output for four seats with seat 2 occupied:
/// ```text
/// Seat 1: [ ]    Seat 2: [X]
/// Seat 3: [ ]    Seat 4: [ ]
/// ```
pub fn render_map(status: &[SeatStatus]) -> String {
    let mut output = String::new();
    for (row, pair) in status.chunks(2).enumerate() {
        let left = row * 2 + 1;
        push_seat(&mut output, left, pair[0]);
        if let Some(right) = pair.get(1) {
            output.push_str(AISLE);
            push_seat(&mut output, left + 1, *right);
        }
        output.push('\n');
    }
    output
}

fn push_seat(output: &mut String, number: usize, status: SeatStatus) {
    output.push_str(&format!("Seat {}: [{}]", number, status.symbol()));
}
