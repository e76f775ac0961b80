//! Thread-safe shared ownership.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// Clones share the same value. Any number of readers may hold `get()` guards
/// at once; `get_mut()` is exclusive.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_collision::core::MtResource;
/// use voxel_collision::{BlockType, Chunk};
///
/// let chunk = MtResource::new(Chunk::empty(&Point3::new(0, 0, 0)));
/// let shared = chunk.clone();
///
/// shared.get_mut().set_block_at(Point3::new(1, 2, 3), BlockType::DIRT);
/// assert!(chunk.get().is_block_opaque(Point3::new(1, 2, 3)));
/// ```
///
/// ## Sharing Between Threads
/// ```
/// # use std::thread;
/// use cgmath::Point3;
/// use voxel_collision::core::MtResource;
/// use voxel_collision::{ChunkGenerationMethod, World};
///
/// let world = MtResource::new(World::new(ChunkGenerationMethod::Solid));
/// let writer = world.clone();
///
/// let handle = thread::spawn(move || {
///     writer.get_mut().add_chunk_at(Point3::new(0, 0, 0));
/// });
///
/// handle.join().unwrap();
/// assert!(world.get().get_chunk_at(Point3::new(0, 0, 0)).is_some());
/// ```
///
/// # Performance Considerations
/// - Collision scans only take read guards, so they run alongside other readers
/// - A block edit holds one chunk's write guard for the duration of the edit
pub struct MtResource<T: Send + Sync> {
    /// The shared, locked value
    pub resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read guard for the contained value.
    ///
    /// A poisoned lock is recovered: the value is plain data and stays
    /// consistent even if a writer panicked.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a write guard for the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let counter = MtResource::new(0u32);
        let other = counter.clone();
        *other.get_mut() += 2;
        assert_eq!(*counter.get(), 2);
        assert!(Arc::ptr_eq(&counter.resource, &other.resource));
    }

    #[test]
    fn poisoned_lock_still_reads() {
        let value = MtResource::new(vec![1, 2, 3]);
        let clone = value.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.get_mut();
            panic!("writer failed");
        })
        .join();
        assert_eq!(value.get().len(), 3);
    }
}
