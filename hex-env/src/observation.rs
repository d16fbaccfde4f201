//! Board encoding handed to the agent

use hex_core::{Board, Occupant};
use serde::Serialize;

use crate::config::ObservationType;

/// Number of planes in the three-channel encoding
pub const CHANNELS: usize = 3;

/// Channel-major `[3, size, size]` tensor of 0.0/1.0 values
///
/// Channel 0 marks First's stones, channel 1 Second's, channel 2 empty cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Observation {
    size: usize,
    planes: Vec<f32>,
}

impl Observation {
    pub fn encode(board: &Board, kind: ObservationType) -> Self {
        match kind {
            ObservationType::Numpy3c => Self::three_channel(board),
        }
    }

    fn three_channel(board: &Board) -> Self {
        let size = board.size();
        let area = size * size;
        let mut planes = vec![0.0; CHANNELS * area];
        for (i, occupant) in board.cells().iter().enumerate() {
            let channel = match occupant {
                Occupant::OwnedByFirst => 0,
                Occupant::OwnedBySecond => 1,
                Occupant::Empty => 2,
            };
            planes[channel * area + i] = 1.0;
        }
        Self { size, planes }
    }

    pub fn get(&self, channel: usize, row: usize, col: usize) -> f32 {
        self.planes[(channel * self.size + row) * self.size + col]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.planes
    }

    pub fn shape(&self) -> [usize; 3] {
        [CHANNELS, self.size, self.size]
    }
}
