use glow_lines::{
    DrawCall, FramePlan, IndexFormat, Indices, LineMesh, Topology,
    frame::CLEAR_COLOR,
    transform::{self, OrthoBounds},
};

#[test]
fn frame_at_640_by_480() {
    let mesh = LineMesh::zigzag(IndexFormat::U16);
    let plan = FramePlan::new([640, 480], &mesh);

    assert_eq!(plan.aspect_ratio, 640.0 / 480.0);
    assert_eq!(plan.viewport(), [0, 0, 640, 480]);
    assert_eq!(plan.clear_color, CLEAR_COLOR);
    assert!(!plan.depth_test);
    assert!(plan.mvp.abs_diff_eq(transform::mvp(640.0 / 480.0), 0.0));

    let bounds = OrthoBounds::from_aspect_ratio(plan.aspect_ratio);
    assert_eq!(bounds.left, -plan.aspect_ratio);
    assert_eq!(bounds.right, plan.aspect_ratio);
}

#[test]
fn draw_call_sequence() {
    let mesh = LineMesh::zigzag(IndexFormat::U16);
    let plan = FramePlan::new([640, 480], &mesh);

    assert_eq!(
        plan.draw_calls,
        vec![
            DrawCall::Indexed {
                topology: Topology::LineStrip,
                count: 6,
                primitive_restart: true,
            },
            DrawCall::Arrays {
                topology: Topology::Lines,
                first: 0,
                count: 2,
            },
        ]
    );
    assert_eq!(Topology::LineStrip.gl_mode(), glow_lines::glow::LINE_STRIP);
    assert_eq!(Topology::Lines.gl_mode(), glow_lines::glow::LINES);
}

#[test]
fn restart_yields_two_disconnected_segments() {
    for format in [IndexFormat::U16, IndexFormat::U32] {
        let mesh = LineMesh::zigzag(format);
        let plan = FramePlan::new([640, 480], &mesh);
        let segments = plan.segments(&mesh);

        assert_eq!(segments[0], vec![[0, 1], [2, 3]], "{format:?}");
        assert!(!segments[0].contains(&[1, 2]), "vertex 1 must not connect to vertex 2");
    }
}

#[test]
fn same_indices_without_restart_would_connect() {
    let mesh = LineMesh::zigzag(IndexFormat::U16);
    let draw_call = DrawCall::Indexed {
        topology: Topology::LineStrip,
        count: 6,
        primitive_restart: false,
    };
    // Without restart the sentinel is an ordinary vertex index.
    let segments = draw_call.segments(mesh.indices());
    assert_eq!(segments.len(), 5);
    assert!(segments.contains(&[1, 0xFFFF]));
}

#[test]
fn unindexed_draw_ignores_the_index_buffer() {
    let draw_call = DrawCall::Arrays {
        topology: Topology::Lines,
        first: 0,
        count: 2,
    };
    for indices in [
        LineMesh::zigzag(IndexFormat::U16).indices().clone(),
        Indices::U32(vec![3, 2, 1, 0]),
        Indices::U16(vec![]),
    ] {
        assert_eq!(draw_call.segments(&indices), vec![[0, 1]]);
    }
}

#[test]
fn square_framebuffer_mvp() {
    let mesh = LineMesh::zigzag(IndexFormat::U16);
    let plan = FramePlan::new([500, 500], &mesh);

    let expected = glam::Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0)
        * glam::Mat4::from_scale(glam::Vec3::splat(0.1));
    assert_eq!(plan.aspect_ratio, 1.0);
    assert!(plan.mvp.abs_diff_eq(expected, 1e-6));
}

#[test]
fn resize_only_changes_viewport_and_projection() {
    let mesh = LineMesh::zigzag(IndexFormat::U16);
    let before = mesh.clone();

    let small = FramePlan::new([640, 480], &mesh);
    let large = FramePlan::new([1920, 1080], &mesh);

    assert_ne!(small.viewport(), large.viewport());
    assert_ne!(small.mvp, large.mvp);
    assert_eq!(small.draw_calls, large.draw_calls);
    assert_eq!(small.clear_color, large.clear_color);
    assert_eq!(mesh, before);
}

#[test]
fn zero_height_is_not_guarded() {
    let mesh = LineMesh::zigzag(IndexFormat::U16);
    let plan = FramePlan::new([640, 0], &mesh);
    assert_eq!(plan.aspect_ratio, f32::INFINITY);
    assert_eq!(plan.viewport(), [0, 0, 640, 0]);
}

#[test]
fn indexed_lines_restart_drops_the_unpaired_vertex() {
    let draw = DrawCall::Indexed {
        topology: Topology::Lines,
        count: 4,
        primitive_restart: true,
    };
    assert_eq!(draw.segments(&Indices::U16(vec![0, 0xFFFF, 1, 2])), vec![[1, 2]]);
}

#[test]
fn unindexed_draw_near_the_end_of_the_index_range() {
    let draw = DrawCall::Arrays {
        topology: Topology::Lines,
        first: u32::MAX,
        count: 2,
    };
    assert!(draw.segments(&Indices::U16(vec![])).is_empty());

    let draw = DrawCall::Arrays {
        topology: Topology::Lines,
        first: u32::MAX - 2,
        count: 4,
    };
    assert_eq!(
        draw.segments(&Indices::U16(vec![])),
        vec![[u32::MAX - 2, u32::MAX - 1]]
    );
}
