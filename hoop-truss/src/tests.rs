use crate::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn dist(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b).map(|(a, b)| (a - b).powi(2)).sum::<f64>().sqrt()
}

#[test]
fn chord_is_monotonic() {
    let hoop = HoopTruss::example();
    let chords = linspace(0., FRAC_PI_2, 91)
        .map(|phi| {
            let state = hoop.solve(phi);
            assert_relative_eq!(state.chord, 2. * hoop.arm * phi.sin(), max_relative = 1e-12);
            state.chord
        })
        .collect::<Vec<_>>();
    assert!(chords.windows(2).all(|w| w[0] <= w[1]));
    assert!(chords.iter().all(|&c| (0.0..=2. * hoop.arm).contains(&c)));
}

#[test]
fn scissor_arm_rigidity() {
    let hoop = HoopTruss::example();
    for phi in linspace(0.01, FRAC_PI_2, 40) {
        let state = hoop.solve(phi);
        let n = state.unit();
        for (nodes, joints) in [
            (&state.upper, &state.upper_joints),
            (&state.lower, &state.lower_joints),
        ] {
            for i in 0..n {
                let next = (i + 1) % n;
                assert_relative_eq!(dist(nodes[i], joints[i]), hoop.arm, max_relative = 1e-9);
                assert_relative_eq!(dist(joints[i], nodes[next]), hoop.arm, max_relative = 1e-9);
            }
        }
        assert!(state.arm_residual(hoop.arm) < 1e-9 * hoop.arm);
    }
}

#[test]
fn deployed_reference() {
    let hoop = HoopTruss::example();
    let state = hoop.solve(FRAC_PI_2);
    assert_abs_diff_eq!(state.chord, 565.68, epsilon = 1e-9);
    let radius = 565.68 / (2. * 15f64.to_radians().sin());
    assert_abs_diff_eq!(state.radius, radius, epsilon = 1e-9);
    assert_abs_diff_eq!(state.radius, 1092.8, epsilon = 0.1);
    // Fully deployed joints sit on the chord midpoints
    for (i, &joint) in state.upper_joints.iter().enumerate() {
        let [p1, p2] = [state.upper[i], state.upper[(i + 1) % 12]];
        let mid = std::array::from_fn(|k| (p1[k] + p2[k]) * 0.5);
        assert!(dist(joint, mid) < 1e-6);
    }
}

#[test]
fn folded_reference() {
    let hoop = HoopTruss::example();
    let state = hoop.solve(PI / 12.);
    assert_abs_diff_eq!(state.chord, 146.4, epsilon = 0.05);
    assert_relative_eq!(state.radius, hoop.radius(PI / 12.));
    for (i, &[x, y, z]) in state.upper.iter().enumerate() {
        assert_relative_eq!(x.hypot(y), state.radius, max_relative = 1e-12);
        assert_eq!(z, hoop.upper);
        let theta = y.atan2(x).rem_euclid(TAU);
        assert_abs_diff_eq!(theta, (30. * i as f64).to_radians(), epsilon = 1e-9);
    }
    for (p1, p2) in state.upper.iter().zip(&state.lower) {
        assert_eq!(p1[..2], p2[..2]);
        assert_eq!(p2[2], hoop.lower);
    }
}

#[test]
fn adjacent_nodes_span_the_chord() {
    let hoop = HoopTruss { unit: 7, ..HoopTruss::example() };
    let state = hoop.solve(1.);
    for i in 0..7 {
        let d = dist(state.lower[i], state.lower[(i + 1) % 7]);
        assert_relative_eq!(d, state.chord, max_relative = 1e-12);
    }
}

#[test]
fn joints_follow_the_midpoint_direction() {
    let hoop = HoopTruss::example();
    let state = hoop.solve(PI / 12.);
    let joint = [50.958980547656125, 13.654417684857748, 38.62089572863175];
    assert!(dist(state.upper_joints[0], joint) < 1e-6);
    assert_relative_eq!(dist(state.upper[0], joint), hoop.arm, max_relative = 1e-9);
    assert_relative_eq!(dist(state.upper[1], joint), hoop.arm, max_relative = 1e-9);
    // The lower plane passes through the origin
    assert!(state.lower_joints.iter().all(|p| p[2] == hoop.lower));
    for (i, &joint) in state.upper_joints.iter().enumerate() {
        let [p1, p2] = [state.upper[i], state.upper[(i + 1) % 12]];
        let mid: [f64; 3] = std::array::from_fn(|k| (p1[k] + p2[k]) * 0.5);
        let [mid, joint] = [mid, joint].map(nalgebra::Vector3::<f64>::from);
        assert!(joint.cross(&mid).norm() <= 1e-9 * joint.norm() * mid.norm());
        assert!(joint.norm() < mid.norm());
    }
}

#[test]
fn sequence_three_states() {
    let seq = generate_sequence(&HoopTruss::example(), PI / 12., FRAC_PI_2, 3);
    let phi = seq.iter().map(|s| s.phi).collect::<Vec<_>>();
    for (a, b) in phi.iter().zip([PI / 12., 7. * PI / 24., FRAC_PI_2]) {
        assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
    }
}

#[test]
fn sequence_single_and_empty() {
    let hoop = HoopTruss::example();
    let seq = generate_sequence(&hoop, 0.3, 1.2, 1);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq[0].phi, 0.3);
    assert!(generate_sequence(&hoop, 0.3, 1.2, 0).is_empty());
}

#[test]
fn sequence_is_restartable() {
    let hoop = HoopTruss::example();
    let iter = hoop.sequence_iter(hoop.folded, hoop.deployed, 10);
    assert_eq!(iter.len(), 10);
    let a = iter.collect::<Vec<_>>();
    let b = hoop.deployment(10);
    assert_eq!(a, b);
    assert!(a.windows(2).all(|w| w[0].phi < w[1].phi));
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_sequence_keeps_order() {
    let hoop = HoopTruss::example();
    let [start, end] = hoop.angle_bound();
    let par = par_sequence(&hoop, start, end, 64);
    assert_eq!(par, generate_sequence(&hoop, start, end, 64));
    let deploy = Deploy { mode: Mode::Anim, ..Deploy::new() };
    assert_eq!(deploy.par_run(&hoop), deploy.run(&hoop));
}

#[test]
fn solver_is_pure() {
    let hoop = HoopTruss::example();
    let a = hoop.solve(0.7);
    let b = hoop.solve(0.7);
    assert_eq!(a, b);
    let bits = |s: &FoldingState| {
        s.nodes()
            .flat_map(|(_, _, p)| p.map(f64::to_bits))
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn invalid_mode_before_geometry() {
    let err = Deploy::from_mode("foo").unwrap_err();
    assert_eq!(err, Error::Mode("foo".to_string()));
    assert!(err.to_string().contains("foo"));
    assert_eq!("static".parse::<Mode>(), Ok(Mode::Static));
    assert_eq!("animation".parse::<Mode>(), Ok(Mode::Anim));
    for s in ["Animation", "anim", " static", ""] {
        assert_eq!(s.parse::<Mode>(), Err(Error::Mode(s.to_string())));
    }
}

#[test]
fn deploy_count_follows_mode() {
    let hoop = HoopTruss::example();
    let deploy = Deploy { states: 4, frames: 9, ..Deploy::new() };
    assert_eq!(deploy.count(), 4);
    assert_eq!(deploy.run(&hoop).len(), 4);
    let deploy = Deploy { mode: Mode::Anim, ..deploy };
    assert_eq!(deploy.count(), 9);
    let states = deploy.run(&hoop);
    assert_abs_diff_eq!(states[0].phi, hoop.folded);
    assert_abs_diff_eq!(states[8].phi, hoop.deployed, epsilon = 1e-12);
}

#[test]
fn degenerate_zero_angle() {
    let hoop = HoopTruss::example();
    let state = hoop.solve(0.);
    assert_eq!(state.chord, 0.);
    assert_eq!(state.radius, 0.);
    for (_, _, [x, y, _]) in state.nodes() {
        assert!(x.is_finite() && y.is_finite());
        assert_abs_diff_eq!(x.hypot(y), 0., epsilon = 1e-12);
    }
    // Folded joints hang below the upper nodes
    assert_relative_eq!(dist(state.upper[0], state.upper_joints[0]), hoop.arm);
    assert_eq!(state.lower_joints[0], [0.; 3]);
    // Close to zero, the hoop nodes converge to the axis
    let state = hoop.solve(1e-16);
    assert!(state.chord < 1e-12 && state.radius < 1e-12);
    for &[x, y, _] in state.upper.iter().chain(&state.lower) {
        assert_abs_diff_eq!(x.hypot(y), 0., epsilon = 1e-12);
    }
}

#[test]
fn deployed_bound_is_clamped() {
    // The half chord reaches the arm length
    let hoop = HoopTruss::example();
    let state = hoop.solve(FRAC_PI_2 + 1e-9);
    assert!(state.chord <= 2. * hoop.arm);
    let state = HoopTruss { arm: 1., ..hoop }.solve(FRAC_PI_2);
    assert!(state.upper_joints.iter().flatten().all(|x| x.is_finite()));
}

#[test]
fn parameter_check() {
    assert!(HoopTruss::example().check().is_ok());
    let bad = [
        HoopTruss { unit: 2, ..HoopTruss::example() },
        HoopTruss { arm: 0., ..HoopTruss::example() },
        HoopTruss { upper: -1., ..HoopTruss::example() },
        HoopTruss { folded: 0., ..HoopTruss::example() },
        HoopTruss { deployed: PI, ..HoopTruss::example() },
    ];
    for hoop in bad {
        assert!(matches!(hoop.check(), Err(Error::Param(_))));
    }
    // The solver still answers
    let state = HoopTruss { unit: 2, ..HoopTruss::example() }.solve(1.);
    assert_eq!(state.unit(), 2);
}

#[test]
fn bar_topology() {
    let state = HoopTruss::example().solve(1.);
    let bars = state.bars();
    let count = |kind| bars.iter().filter(|b| b.kind == kind).count();
    assert_eq!(count(BarKind::UpperHoop), 12);
    assert_eq!(count(BarKind::LowerHoop), 12);
    assert_eq!(count(BarKind::Arm), 48);
    assert_eq!(count(BarKind::Vertical), 12);
    assert_eq!(count(BarKind::Brace), 12);
    let brace = bars.iter().find(|b| b.kind == BarKind::Brace).unwrap();
    assert_eq!(brace.ends, [state.upper[0], state.lower_joints[10]]);
    let vertical = bars.iter().find(|b| b.kind == BarKind::Vertical).unwrap();
    assert_abs_diff_eq!(vertical.length(), 200.);
}

#[test]
fn label_and_frame() {
    let hoop = HoopTruss::example();
    let state = hoop.solve(PI / 12.);
    assert_eq!(state.label(), "φ = 15.0°");
    let [x, y, z] = state.frame_bound();
    assert_relative_eq!(x[1], 1.5 * state.radius);
    assert_eq!(x, y);
    assert_eq!(z, [hoop.lower, hoop.upper]);
    let [r0, r1] = hoop.radius_bound();
    assert!(r0 < r1);
}

#[cfg(feature = "serde")]
#[test]
fn config_round_trip() {
    let deploy = Deploy { mode: Mode::Anim, states: 5, frames: 30 };
    let s = ron::to_string(&deploy).unwrap();
    assert!(s.contains("\"animation\""));
    assert_eq!(ron::from_str::<Deploy>(&s).unwrap(), deploy);
    let hoop = ron::from_str::<HoopTruss>("(unit: 8)").unwrap();
    assert_eq!(hoop, HoopTruss { unit: 8, ..HoopTruss::example() });
    let err = ron::from_str::<Deploy>("(mode: \"foo\")").unwrap_err();
    assert!(err.to_string().contains("foo"));
}

#[cfg(feature = "csv")]
#[test]
fn csv_nodes() {
    let state = HoopTruss::example().solve(1.);
    let s = csv::dump_nodes(&state).unwrap();
    let mut lines = s.lines();
    assert_eq!(lines.next(), Some("kind,index,x,y,z"));
    assert_eq!(lines.count(), 48);
    assert!(s.contains("lower_joint,11,"));
}

#[cfg(feature = "plot")]
#[test]
fn plot_snapshots_and_frames() {
    use crate::plot::*;
    let hoop = HoopTruss::example();
    let states = Deploy::new().run(&hoop);
    let mut buf = String::new();
    snapshots(SVGBackend::with_string(&mut buf, (1800, 600)), &states, Opt::default()).unwrap();
    for state in &states {
        assert!(buf.contains(&state.label()));
    }
    let mut buf = String::new();
    Figure::new(&hoop.solve(0.))
        .legend(true)
        .node_name(true)
        .plot(SVGBackend::with_string(&mut buf, (600, 600)))
        .unwrap();
    assert!(buf.contains("Scissor Arm"));
    let mut gif = Vec::new();
    let mut anim = Animation::new(&mut gif, (120, 120), 50)
        .unwrap()
        .bound(common_bound(&states));
    for state in &states {
        anim.push(state).unwrap();
    }
    assert_eq!(anim.len(), 3);
    assert_eq!(anim.finish(), 3);
    assert!(gif.starts_with(b"GIF89a"));
    assert_eq!(gif.last(), Some(&0x3b));
}

#[cfg(feature = "plot")]
#[test]
fn animation_reports_write_errors() {
    use crate::plot::*;
    struct Full;
    impl std::io::Write for Full {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
    let state = HoopTruss::example().solve(1.);
    let res = Animation::new(Full, (60, 60), 50).and_then(|mut anim| anim.push(&state));
    assert!(matches!(res, Err(RenderError::Image(_))));
}

#[cfg(feature = "plot")]
#[test]
fn svg_frames_report_progress() {
    use crate::plot::*;
    let states = HoopTruss::example().deployment(4);
    let dir = std::env::temp_dir().join(format!("hoop-truss-frames-{}", std::process::id()));
    let mut done = Vec::new();
    let files = svg_frames_with(&dir, &states, (300, 300), Opt::default(), |i| done.push(i))
        .unwrap();
    assert_eq!(done, [0, 1, 2, 3]);
    assert_eq!(files.len(), 4);
    let svg = std::fs::read_to_string(&files[3]).unwrap();
    assert!(svg.contains(&states[3].label()));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[cfg(feature = "font")]
#[test]
fn raster_frame_carries_the_label() {
    use crate::plot::*;
    let state = HoopTruss::example().solve(1.);
    assert!(Opt::raster().label);
    let draw = |label| {
        let mut buf = vec![0; 200 * 200 * 3];
        Figure::new(&state)
            .with_opt(Opt::raster())
            .label(label)
            .plot(BitMapBackend::with_buffer(&mut buf, (200, 200)))
            .unwrap();
        buf
    };
    assert_ne!(draw(true), draw(false));
}
