/// One chunk of frames split into channel-separated sample arrays.
/// `left` and `right` always hold the same number of samples.
#[derive(Clone, Debug, Default)]
pub struct StereoChunk {
    pub left: Vec<i16>,
    pub right: Vec<i16>,
}

impl StereoChunk {
    pub fn with_capacity(frames: usize) -> Self {
        Self {
            left: Vec::with_capacity(frames),
            right: Vec::with_capacity(frames),
        }
    }

    pub fn push(&mut self, left: i16, right: i16) {
        self.left.push(left);
        self.right.push(right);
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn frames(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.left
            .iter()
            .copied()
            .zip(self.right.iter().copied())
    }
}
