//! CPU-side line geometry: vertex positions plus an index buffer that may
//! contain primitive-restart sentinels.

/// Width of the indices in an index buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// `GL_UNSIGNED_SHORT`
    #[default]
    U16,

    /// `GL_UNSIGNED_INT`
    U32,
}

impl IndexFormat {
    /// The sentinel used by `GL_PRIMITIVE_RESTART_FIXED_INDEX`: the largest value of the width.
    pub fn restart_index(self) -> u32 {
        match self {
            Self::U16 => u16::MAX as u32,
            Self::U32 => u32::MAX,
        }
    }

    /// The `type` argument of `glDrawElements`.
    pub fn gl_type(self) -> u32 {
        match self {
            Self::U16 => glow::UNSIGNED_SHORT,
            Self::U32 => glow::UNSIGNED_INT,
        }
    }

    /// Bytes per index.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::U16 => size_of::<u16>(),
            Self::U32 => size_of::<u32>(),
        }
    }
}

/// An index buffer in one of the supported widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    /// Builds an index buffer of the given width from `u32` values.
    ///
    /// `None` entries become the restart sentinel of that width.
    ///
    /// # Errors
    /// If a vertex index does not fit in the width, or collides with its sentinel.
    pub fn from_slots(format: IndexFormat, slots: &[Option<u32>]) -> Result<Self, MeshError> {
        let restart = format.restart_index();
        let values = slots
            .iter()
            .enumerate()
            .map(|(position, slot)| match *slot {
                None => Ok(restart),
                Some(index) if index < restart => Ok(index),
                Some(index) => Err(MeshError::IndexNotRepresentable {
                    position,
                    index,
                    format,
                }),
            });
        Ok(match format {
            IndexFormat::U16 => Self::U16(
                values
                    .map(|value| value.map(|value| value as u16))
                    .collect::<Result<_, _>>()?,
            ),
            IndexFormat::U32 => Self::U32(values.collect::<Result<_, _>>()?),
        })
    }

    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::U16,
            Self::U32(_) => IndexFormat::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The indices widened to `u32`. The restart sentinel stays the sentinel of
    /// [`Self::format`], so compare against `self.format().restart_index()`.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            Self::U16(indices) => indices.iter().copied().map(u32::from).collect(),
            Self::U32(indices) => indices.clone(),
        }
    }

    /// Raw bytes, ready for `glBufferData`.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(indices) => bytemuck::cast_slice(indices),
            Self::U32(indices) => bytemuck::cast_slice(indices),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("a line mesh needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("index {index} at position {position} can't be stored as a {format:?} index")]
    IndexNotRepresentable {
        position: usize,
        index: u32,
        format: IndexFormat,
    },
}

/// Vertex positions and the indices that connect them.
///
/// Immutable once built: the painter uploads it once as static data.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMesh {
    positions: Vec<[f32; 3]>,
    indices: Indices,
}

impl LineMesh {
    /// # Errors
    /// If there are fewer than two vertices, or an index that is not the restart
    /// sentinel points past the last vertex.
    pub fn new(positions: Vec<[f32; 3]>, indices: Indices) -> Result<Self, MeshError> {
        if positions.len() < 2 {
            return Err(MeshError::TooFewVertices(positions.len()));
        }

        let restart = indices.format().restart_index();
        for (position, index) in indices.to_u32().into_iter().enumerate() {
            if index != restart && index as usize >= positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    position,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        Ok(Self { positions, indices })
    }

    /// Four points forming a zigzag, split by restart sentinels into the
    /// two segments 0-1 and 2-3.
    pub fn zigzag(format: IndexFormat) -> Self {
        Self {
            positions: vec![
                [-6.0, 5.0, 0.0],
                [0.0, 5.0, 0.0],
                [6.0, 5.0, 0.0],
                [6.0, -5.0, 0.0],
            ],
            indices: match format {
                IndexFormat::U16 => Indices::U16(vec![0, 1, u16::MAX, 2, 3, u16::MAX]),
                IndexFormat::U32 => Indices::U32(vec![0, 1, u32::MAX, 2, 3, u32::MAX]),
            },
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &Indices {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_format(&self) -> IndexFormat {
        self.indices.format()
    }

    /// Tightly packed `vec3` positions, ready for `glBufferData`.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_index_is_the_width_maximum() {
        assert_eq!(IndexFormat::U16.restart_index(), 0xFFFF);
        assert_eq!(IndexFormat::U32.restart_index(), 0xFFFF_FFFF);
        assert_eq!(IndexFormat::U16.gl_type(), glow::UNSIGNED_SHORT);
        assert_eq!(IndexFormat::U32.gl_type(), glow::UNSIGNED_INT);
    }

    #[test]
    fn zigzag_layout() {
        for format in [IndexFormat::U16, IndexFormat::U32] {
            let mesh = LineMesh::zigzag(format);
            let r = format.restart_index();
            assert_eq!(mesh.vertex_count(), 4);
            assert_eq!(mesh.index_format(), format);
            assert_eq!(mesh.indices().to_u32(), vec![0, 1, r, 2, 3, r]);
            assert_eq!(
                mesh.indices().as_bytes().len(),
                6 * format.size_in_bytes()
            );
            assert_eq!(mesh.position_bytes().len(), 4 * 3 * size_of::<f32>());
        }
    }

    #[test]
    fn zigzag_passes_validation() {
        let mesh = LineMesh::zigzag(IndexFormat::U16);
        let rebuilt = LineMesh::new(mesh.positions().to_vec(), mesh.indices().clone());
        assert_eq!(rebuilt, Ok(mesh));
    }

    #[test]
    fn rejects_bad_meshes() {
        assert_eq!(
            LineMesh::new(vec![[0.0; 3]], Indices::U16(vec![0])),
            Err(MeshError::TooFewVertices(1))
        );
        assert_eq!(
            LineMesh::new(vec![[0.0; 3]; 2], Indices::U32(vec![0, 1, 2])),
            Err(MeshError::IndexOutOfRange {
                position: 2,
                index: 2,
                vertex_count: 2,
            })
        );
    }

    #[test]
    fn slots_map_none_to_the_sentinel() {
        assert_eq!(
            Indices::from_slots(IndexFormat::U16, &[Some(1), None, Some(65_534)]),
            Ok(Indices::U16(vec![1, u16::MAX, 65_534]))
        );
        assert_eq!(
            Indices::from_slots(IndexFormat::U32, &[None, Some(70_000)]),
            Ok(Indices::U32(vec![u32::MAX, 70_000]))
        );
    }

    #[test]
    fn slots_that_would_alias_the_sentinel_are_rejected() {
        // Vertex 65535 of a large mesh must not silently turn into a restart.
        assert_eq!(
            Indices::from_slots(IndexFormat::U16, &[Some(0), Some(65_535)]),
            Err(MeshError::IndexNotRepresentable {
                position: 1,
                index: 65_535,
                format: IndexFormat::U16,
            })
        );
        assert_eq!(
            Indices::from_slots(IndexFormat::U16, &[Some(70_000)]),
            Err(MeshError::IndexNotRepresentable {
                position: 0,
                index: 70_000,
                format: IndexFormat::U16,
            })
        );
        assert!(Indices::from_slots(IndexFormat::U32, &[Some(u32::MAX)]).is_err());
    }
}
