//! Caller-owned storage for cloned shapes.

use std::mem;

use log::debug;

use crate::math::vec2::Vec2;

use super::Shape;

/// Typed index of a shape stored in a [`ShapeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(usize);

impl ShapeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every shape allocated into it. Handles stay valid for the arena's
/// whole lifetime; shapes are never removed individually.
#[derive(Debug, Default, Clone)]
pub struct ShapeArena {
    shapes: Vec<Shape>,
    allocated_bytes: usize,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ShapeArena {
            shapes: Vec::with_capacity(capacity),
            allocated_bytes: 0,
        }
    }

    /// Takes ownership of `shape` and returns its handle.
    pub fn allocate(&mut self, shape: Shape) -> ShapeHandle {
        let handle = ShapeHandle(self.shapes.len());
        let bytes = footprint(&shape);
        self.allocated_bytes += bytes;
        debug!(
            "arena allocated {:?} shape #{} ({} bytes)",
            shape.shape_type(),
            handle.0,
            bytes
        );
        self.shapes.push(shape);
        handle
    }

    pub fn get(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (ShapeHandle(i), shape))
    }

    /// Bytes taken by stored shapes, including polygon vertex buffers.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes
    }
}

fn footprint(shape: &Shape) -> usize {
    let inline = mem::size_of::<Shape>();
    match shape {
        Shape::Polygon(polygon) => {
            inline + 2 * polygon.vertex_count() * mem::size_of::<Vec2>()
        }
        Shape::Circle(_) | Shape::ImplicitField(_) => inline,
    }
}
