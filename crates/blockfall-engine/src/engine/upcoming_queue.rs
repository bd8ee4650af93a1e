use std::collections::VecDeque;

use crate::{BagSeed, Piece, PieceKind};

use super::bag::BagRandomizer;

/// Spawn-ready pieces waiting to enter the board.
///
/// The queue starts with two full bags and tops itself up one bag at a time:
/// after exactly seven pieces have been taken since the last refill, a fresh
/// bag is appended. It therefore never holds more than [`Self::CAPACITY`]
/// pieces and never fewer than eight, which keeps a five-piece preview
/// available at all times.
///
/// # Example
///
/// ```
/// use blockfall_engine::{BagSeed, UpcomingQueue};
///
/// let mut queue = UpcomingQueue::with_seed(BagSeed::from_u64(1));
/// assert_eq!(queue.len(), 14);
///
/// let first = queue.peek(0).unwrap();
/// assert_eq!(queue.dequeue(), first);
/// assert_eq!(queue.len(), 13);
/// ```
#[derive(Debug, Clone)]
pub struct UpcomingQueue {
    randomizer: BagRandomizer,
    pieces: VecDeque<Piece>,
    dequeued_since_refill: usize,
}

impl UpcomingQueue {
    pub const CAPACITY: usize = PieceKind::LEN * 2;

    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        let mut randomizer = BagRandomizer::with_seed(seed);
        let mut pieces = VecDeque::with_capacity(Self::CAPACITY);
        randomizer.extend(&mut pieces);
        randomizer.extend(&mut pieces);
        Self {
            randomizer,
            pieces,
            dequeued_since_refill: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns the piece `index` places from the front, if queued.
    #[must_use]
    pub fn peek(&self, index: usize) -> Option<Piece> {
        self.pieces.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    /// Takes the front piece, refilling with a new bag every seventh call.
    pub fn dequeue(&mut self) -> Piece {
        let piece = self
            .pieces
            .pop_front()
            .expect("Upcoming queue should never be empty");
        self.dequeued_since_refill += 1;
        if self.dequeued_since_refill == PieceKind::LEN {
            self.dequeued_since_refill = 0;
            self.randomizer.extend(&mut self.pieces);
        }
        debug_assert!(self.pieces.len() <= Self::CAPACITY);
        piece
    }
}
