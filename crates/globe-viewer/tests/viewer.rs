//! End-to-end frames through config, composer, grid tessellator and pipeline.

use globe_config::Config;
use globe_frame::Offset;
use globe_projection::ProjectionKind;
use globe_viewer::{Viewer, ViewerError};

fn config(projection: ProjectionKind) -> Config {
    let mut config = Config::default();
    config.globe.projection = projection;
    config
}

#[test]
fn view_straddling_the_antimeridian_draws_two_copies() {
    let mut viewer = Viewer::from_config(&config(ProjectionKind::Equirectangular)).unwrap();

    let stats = viewer.frame().unwrap();

    assert_eq!(stats.populated, vec![Offset::Center, Offset::Right]);
    let draws = viewer.pipeline().last_frame();
    assert_eq!(draws.len(), 2);

    assert_eq!(draws[0].offset, Offset::Center);
    assert!((draws[0].sector.min_longitude.degrees() - 130.0).abs() < 1e-6);
    assert!((draws[0].sector.max_longitude.degrees() - 180.0).abs() < 1e-6);

    assert_eq!(draws[1].offset, Offset::Right);
    assert!((draws[1].sector.min_longitude.degrees() + 180.0).abs() < 1e-6);
    assert!((draws[1].sector.max_longitude.degrees() + 170.0).abs() < 1e-6);
}

#[test]
fn panning_east_moves_into_the_right_copy() {
    let mut viewer = Viewer::from_config(&config(ProjectionKind::Mercator)).unwrap();

    let frames = viewer.run(8).unwrap();

    assert_eq!(frames.len(), 8);
    assert_eq!(frames[0].populated, vec![Offset::Center, Offset::Right]);
    // Camera at 230E: the view spans 200E..260E, entirely in the next copy.
    assert_eq!(frames[7].populated, vec![Offset::Right]);
    assert_eq!(viewer.pipeline().frames_finished(), 8);
    assert_eq!(viewer.context().globe.model().offset, Offset::Center);
}

#[test]
fn seamed_projection_draws_one_copy() {
    for kind in [ProjectionKind::Sinusoidal, ProjectionKind::ModifiedSinusoidal] {
        let mut viewer = Viewer::from_config(&config(kind)).unwrap();
        for stats in viewer.run(4).unwrap() {
            assert_eq!(stats.populated, vec![Offset::Center], "{kind}");
        }
    }
}

#[test]
fn seamed_projection_keeps_drawing_past_the_antimeridian() {
    for kind in [ProjectionKind::PolarEquidistant, ProjectionKind::UniversalPolarStereographic] {
        let mut config = config(kind);
        config.globe.pole = Some(globe_projection::Pole::North);
        let mut viewer = Viewer::from_config(&config).unwrap();

        // 160E through 230E, crossing 180 on the third frame.
        let frames = viewer.run(8).unwrap();

        assert!(viewer.camera().longitude_deg > 180.0);
        for (i, stats) in frames.iter().enumerate() {
            assert_eq!(stats.populated, vec![Offset::Center], "{kind} frame {i}");
            assert_eq!(stats.drawn, 1, "{kind} frame {i}");
        }
    }
}

#[test]
fn round_globe_builds_center_only() {
    let mut config = config(ProjectionKind::Equirectangular);
    config.globe.flat = false;
    let mut viewer = Viewer::from_config(&config).unwrap();

    let stats = viewer.frame().unwrap();

    assert_eq!(stats.populated, vec![Offset::Center]);
    assert_eq!(stats.drawn, 1);
}

#[test]
fn missing_projection_parameters_fail_at_startup() {
    let tm = config(ProjectionKind::TransverseMercator);
    assert!(matches!(Viewer::from_config(&tm), Err(ViewerError::Config(_))));

    let mut polar = config(ProjectionKind::UniversalPolarStereographic);
    assert!(Viewer::from_config(&polar).is_err());
    polar.globe.pole = Some(globe_projection::Pole::North);
    assert!(Viewer::from_config(&polar).is_ok());
}
