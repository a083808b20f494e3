/*!
# HTMincer: Buffer Pool.

Serialization and a few of the rewrite passes need sizeable scratch
strings. Rather than allocating fresh ones for every document, a
[`Minifier`](crate::Minifier) keeps a small pool of them around.

The pool is a fixed set of slots, each holding at most one parked buffer.
Buffers are taken and returned with atomic swaps, so there is no locking,
and a given buffer can only ever be held by one caller at a time.
*/

use std::{
	ops::{
		Deref,
		DerefMut,
	},
	ptr,
	sync::atomic::{
		AtomicPtr,
		Ordering::{
			AcqRel,
			Acquire,
		},
	},
};



/// # Number of Slots.
const SLOTS: usize = 8;

/// # Maximum Parked Capacity.
///
/// Buffers that grew larger than this are dropped rather than parked.
const MAX_CAPACITY: usize = 4 * 1024 * 1024;



/// # Buffer Pool.
pub(crate) struct BufferPool {
	/// # Slots.
	slots: [AtomicPtr<String>; SLOTS],
}

impl Default for BufferPool {
	fn default() -> Self {
		Self {
			slots: std::array::from_fn(|_| AtomicPtr::new(ptr::null_mut())),
		}
	}
}

impl Drop for BufferPool {
	fn drop(&mut self) {
		for slot in &mut self.slots {
			let ptr = std::mem::replace(slot.get_mut(), ptr::null_mut());
			if ! ptr.is_null() {
				// Safety: non-null slot pointers always come from
				// `Box::into_raw`, and `&mut self` means nobody else can be
				// looking at them.
				drop(unsafe { Box::from_raw(ptr) });
			}
		}
	}
}

impl std::fmt::Debug for BufferPool {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BufferPool")
			.field("parked", &self.parked())
			.finish()
	}
}

impl BufferPool {
	#[must_use]
	/// # Acquire.
	///
	/// Take an empty buffer from the pool, or allocate a new one if none
	/// are parked. It is returned automatically when dropped.
	pub(crate) fn acquire(&self, capacity: usize) -> Buffer<'_> {
		for slot in &self.slots {
			let ptr = slot.swap(ptr::null_mut(), AcqRel);
			if ! ptr.is_null() {
				// Safety: the swap made this the sole owner of a pointer
				// that came from `Box::into_raw`.
				let mut buf = *unsafe { Box::from_raw(ptr) };
				buf.clear();
				buf.reserve(capacity);
				return Buffer { pool: self, buf };
			}
		}

		Buffer {
			pool: self,
			buf: String::with_capacity(capacity),
		}
	}

	/// # Release.
	///
	/// Park a buffer in the first free slot, or drop it if there are none.
	fn release(&self, buf: String) {
		if buf.capacity() == 0 || MAX_CAPACITY < buf.capacity() { return; }

		let ptr = Box::into_raw(Box::new(buf));
		for slot in &self.slots {
			if slot.compare_exchange(ptr::null_mut(), ptr, AcqRel, Acquire).is_ok() {
				return;
			}
		}

		// Safety: the pointer was never published, so it is still ours.
		drop(unsafe { Box::from_raw(ptr) });
	}

	#[must_use]
	/// # Number of Parked Buffers.
	pub(crate) fn parked(&self) -> usize {
		self.slots.iter().filter(|s| ! s.load(Acquire).is_null()).count()
	}
}



#[derive(Debug)]
/// # Pooled Buffer.
///
/// This dereferences to a `String`, and goes back to the pool when dropped.
pub(crate) struct Buffer<'a> {
	/// # Pool.
	pool: &'a BufferPool,

	/// # Buffer.
	buf: String,
}

impl Deref for Buffer<'_> {
	type Target = String;

	#[inline]
	fn deref(&self) -> &Self::Target { &self.buf }
}

impl DerefMut for Buffer<'_> {
	#[inline]
	fn deref_mut(&mut self) -> &mut Self::Target { &mut self.buf }
}

impl Drop for Buffer<'_> {
	fn drop(&mut self) {
		self.pool.release(std::mem::take(&mut self.buf));
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_reuse() {
		let pool = BufferPool::default();
		assert_eq!(pool.parked(), 0);

		{
			let mut a = pool.acquire(16);
			a.push_str("Hello");
			let mut b = pool.acquire(16);
			b.push_str("World");
			assert_eq!(a.as_str(), "Hello");
			assert_eq!(b.as_str(), "World");
		}
		assert_eq!(pool.parked(), 2);

		// Reused buffers come back empty.
		let c = pool.acquire(0);
		assert!(c.is_empty());
		assert!(16 <= c.capacity());
		assert_eq!(pool.parked(), 1);
	}

	#[test]
	fn t_threads() {
		let pool = BufferPool::default();
		std::thread::scope(|s| {
			for n in 0..16 {
				let pool = &pool;
				s.spawn(move || for _ in 0..100 {
					let mut buf = pool.acquire(8);
					assert!(buf.is_empty());
					buf.push_str(&n.to_string());
					assert_eq!(buf.as_str(), n.to_string());
				});
			}
		});
		assert!(pool.parked() <= SLOTS);
	}
}
