//! Iterators over sprite set slots.

use super::types::{SlotData, SlotInfo, SpriteKey, SpriteMetric};

/// Iterator over present slots of an open sprite set
///
/// Built from the in-memory slot table only; the container stream is not
/// touched.
pub struct SlotInfoIter<'a> {
	pub(super) slots: &'a [SlotData],
	pub(super) metrics: &'a [SpriteMetric],
	pub(super) current_key: usize,
}

impl<'a> Iterator for SlotInfoIter<'a> {
	type Item = SlotInfo;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current_key < self.slots.len() {
			let key = self.current_key;
			self.current_key += 1;

			let slot = self.slots[key];
			if slot.is_present() {
				return Some(SlotInfo {
					key: key as SpriteKey,
					offset: slot.offset,
					metric: self.metrics.get(key).copied().unwrap_or_default(),
				});
			}
		}

		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.slots.len() - self.current_key))
	}
}
