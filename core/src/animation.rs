use crate::types::*;

impl FrameCounts {
    fn as_array(&self) -> [u32; 5] {
        [self.idle, self.walk, self.punch, self.kick, self.jump]
    }

    /// Frames in the whole strip, `None` if the counts overflow `u32`.
    pub fn total(&self) -> Option<u32> {
        self.as_array()
            .into_iter()
            .try_fold(0u32, |acc, count| acc.checked_add(count))
    }
}

impl FrameLayout {
    /// Partition a single-row strip in `AnimationKey` order.
    /// Offsets saturate at `u32::MAX`; `MatchConfig::validate` rejects such
    /// strips before a layout is built from them.
    pub fn from_counts(counts: &FrameCounts) -> Self {
        let counts = counts.as_array();
        let mut offsets = [0u32; 5];
        let mut next = 0u32;
        for (offset, count) in offsets.iter_mut().zip(counts) {
            *offset = next;
            next = next.saturating_add(count);
        }
        FrameLayout { offsets, counts }
    }

    pub fn total_frames(&self) -> u32 {
        self.counts
            .iter()
            .fold(0u32, |acc, &count| acc.saturating_add(count))
    }

    /// Strip range for a key. Keys with no frames borrow the idle frames.
    pub fn range(&self, key: AnimationKey) -> (u32, u32) {
        let i = key.index();
        if self.counts[i] > 0 {
            (self.offsets[i], self.counts[i])
        } else {
            let idle = AnimationKey::Idle.index();
            (self.offsets[idle], self.counts[idle])
        }
    }
}

/// Playback rate per animation, frames per second.
pub fn fps(key: AnimationKey) -> f64 {
    match key {
        AnimationKey::Idle => 6.0,
        AnimationKey::Walk => 12.0,
        AnimationKey::Punch | AnimationKey::Kick => 18.0,
        AnimationKey::Jump => 10.0,
    }
}

impl AnimationCursor {
    /// Switch to `key` (restarting from its first frame when it changes),
    /// then play `dt` seconds of it, looping.
    pub fn advance(&self, key: AnimationKey, layout: &FrameLayout, dt: f64) -> AnimationCursor {
        let start = if key == self.key { self.index } else { 0.0 };
        let (_, count) = layout.range(key);
        let mut index = start + fps(key) * dt;
        if count > 0 {
            index %= count as f64;
        } else {
            index = 0.0;
        }
        AnimationCursor { key, index }
    }
}

impl Fighter {
    /// Absolute strip frame of the current animation.
    pub fn frame_index(&self) -> u32 {
        let (offset, count) = self.layout.range(self.anim.key);
        if count == 0 {
            return 0;
        }
        offset.saturating_add((self.anim.index.max(0.0) as u32).min(count - 1))
    }
}
