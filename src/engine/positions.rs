use crate::domain::SeatIndex;
use crate::engine::seat::Seat;

/// Все места по кругу, начиная со следующего после `start` (сам `start` – последним).
fn ring_after(seats: &[Seat], start: SeatIndex) -> impl Iterator<Item = &Seat> {
    let n = seats.len();
    let start = start as usize;
    (1..=n).map(move |i| &seats[(start + i) % n])
}

/// Следующее по кругу место после `start`, удовлетворяющее `pred`.
pub fn next_seat_where(
    seats: &[Seat],
    start: SeatIndex,
    pred: impl Fn(&Seat) -> bool,
) -> Option<SeatIndex> {
    if seats.is_empty() {
        return None;
    }
    ring_after(seats, start).find(|s| pred(s)).map(|s| s.index)
}

/// Следующее занятое место после `start`.
pub fn next_occupied_seat(seats: &[Seat], start: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(seats, start, Seat::is_occupied)
}

/// Предыдущее по кругу занятое место перед `start`.
pub fn prev_occupied_seat(seats: &[Seat], start: SeatIndex) -> Option<SeatIndex> {
    let n = seats.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|i| &seats[(start as usize + n - i % n) % n])
        .find(|s| s.is_occupied())
        .map(|s| s.index)
}

/// Места по кругу начиная со следующего после `start`, удовлетворяющие `pred`.
pub fn collect_seats_after(
    seats: &[Seat],
    start: SeatIndex,
    pred: impl Fn(&Seat) -> bool,
) -> Vec<SeatIndex> {
    if seats.is_empty() {
        return Vec::new();
    }
    ring_after(seats, start)
        .filter(|s| pred(s))
        .map(|s| s.index)
        .collect()
}

/// Порядок раздачи нечётных фишек "слева от кнопки".
pub fn order_from_button(seats: &[Seat], button: Option<SeatIndex>) -> Vec<SeatIndex> {
    match button {
        Some(b) => collect_seats_after(seats, b, |_| true),
        None => seats.iter().map(|s| s.index).collect(),
    }
}
