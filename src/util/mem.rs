use bytemuck::Zeroable;

/// Allocate a zero-initialized boxed slice.
pub(crate) fn calloc<T: Zeroable>(size: usize) -> Box<[T]> {
    bytemuck::allocation::zeroed_slice_box(size)
}
