//! What the rasterizer connects, computed on the CPU.
//!
//! Each segment is a pair of vertex indices `[from, to]`.

/// Segments of a `GL_LINE_STRIP` over `indices`.
///
/// When `restart` is `Some`, that value ends the current strip: the vertices on
/// either side of it are not connected.
pub fn line_strip_segments(indices: &[u32], restart: Option<u32>) -> Vec<[u32; 2]> {
    let mut segments = Vec::with_capacity(indices.len().saturating_sub(1));
    let mut previous = None;

    for &index in indices {
        if Some(index) == restart {
            previous = None;
            continue;
        }
        if let Some(previous) = previous {
            segments.push([previous, index]);
        }
        previous = Some(index);
    }

    segments
}

/// Segments of `GL_LINES` over `vertices`. A trailing unpaired vertex is ignored.
///
/// When `restart` is `Some`, that value starts pairing over, so a vertex left
/// unpaired before it is dropped.
pub fn line_list_segments(vertices: &[u32], restart: Option<u32>) -> Vec<[u32; 2]> {
    let runs: Vec<&[u32]> = match restart {
        Some(restart) => vertices.split(|&v| v == restart).collect(),
        None => vec![vertices],
    };
    runs.into_iter()
        .flat_map(|run| run.chunks_exact(2))
        .map(|pair| [pair[0], pair[1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: u32 = u16::MAX as u32;

    #[test]
    fn restart_splits_the_strip() {
        assert_eq!(
            line_strip_segments(&[0, 1, R, 2, 3, R], Some(R)),
            vec![[0, 1], [2, 3]]
        );
    }

    #[test]
    fn without_restart_everything_is_connected() {
        assert_eq!(
            line_strip_segments(&[0, 1, 2, 3], None),
            vec![[0, 1], [1, 2], [2, 3]]
        );
    }

    #[test]
    fn leading_and_repeated_restarts_draw_nothing_extra() {
        assert_eq!(line_strip_segments(&[R, R, 4, R, 5, 6], Some(R)), vec![[5, 6]]);
        assert!(line_strip_segments(&[R], Some(R)).is_empty());
        assert!(line_strip_segments(&[], Some(R)).is_empty());
    }

    #[test]
    fn line_list_pairs_vertices() {
        assert_eq!(line_list_segments(&[0, 1], None), vec![[0, 1]]);
        assert_eq!(line_list_segments(&[0, 1, 2], None), vec![[0, 1]]);
        assert!(line_list_segments(&[7], None).is_empty());
    }

    #[test]
    fn restart_resets_line_list_pairing() {
        assert_eq!(line_list_segments(&[0, R, 1, 2], Some(R)), vec![[1, 2]]);
        assert_eq!(
            line_list_segments(&[0, 1, 2, R, 3, 4, R], Some(R)),
            vec![[0, 1], [3, 4]]
        );
        // Without restart enabled the sentinel is an ordinary vertex index.
        assert_eq!(line_list_segments(&[0, R, 1, 2], None), vec![[0, R], [1, 2]]);
    }
}
