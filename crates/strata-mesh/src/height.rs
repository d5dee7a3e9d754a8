//! The elevation source consumed by the vertex generator.

use std::sync::Arc;

/// Anything that can report terrain elevation at a sample coordinate.
///
/// Coordinates are in sample units, `0..=terrain_resolution` on each axis.
/// Implementations must be pure: the generator samples the same point many
/// times and relies on getting the same answer.
pub trait HeightField {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<T: HeightField + ?Sized> HeightField for &T {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl<T: HeightField + ?Sized> HeightField for Arc<T> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl<T: HeightField + ?Sized> HeightField for Box<T> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Adapts a closure `|x, y| height` into a [`HeightField`].
#[derive(Clone, Copy, Debug)]
pub struct HeightFn<F>(pub F);

impl<F: Fn(f64, f64) -> f64> HeightField for HeightFn<F> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (self.0)(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_twice<H: HeightField>(h: H) -> (f64, f64) {
        (h.sample(1.0, 2.0), h.sample(3.0, 4.0))
    }

    #[test]
    fn test_closure_adapter() {
        let field = HeightFn(|x: f64, y: f64| x * 10.0 + y);
        assert_eq!(sample_twice(&field), (12.0, 34.0));
    }

    #[test]
    fn test_shared_and_boxed_fields() {
        let shared: Arc<dyn HeightField> = Arc::new(HeightFn(|x: f64, _y: f64| x));
        assert_eq!(sample_twice(shared.clone()), (1.0, 3.0));
        let boxed: Box<dyn HeightField> = Box::new(HeightFn(|_x: f64, y: f64| -y));
        assert_eq!(sample_twice(boxed), (-2.0, -4.0));
    }
}
