mod common;

use common::{MockSource, RecordingRenderer};
use sonoplot_core::axis::frequency_axis;
use sonoplot_core::{
    ChartStrategy, ChartType, CoreError, FftWindow, PointSeries, PointStyle, SignalProcessor,
    SubChartType, Vec3, Visualiser, VisualiserConfig, VisualiserPreset,
};

fn preset(preset: VisualiserPreset, buffer_size: usize) -> VisualiserConfig {
    VisualiserConfig {
        buffer_size,
        ..preset.config()
    }
}

#[test]
fn test_frequency_linear_end_to_end() {
    let source = MockSource::new(vec![vec![0.0; 4]], vec![vec![1.0; 4]]);
    let mut processor = SignalProcessor::new(&source, 4, FftWindow::BlackmanHarris).unwrap();
    let mut chart = ChartStrategy::new(ChartType::Scatter, SubChartType::ScatterFreqLin).unwrap();
    let mut renderer = RecordingRenderer::default();
    let mut series = PointSeries::new(&mut renderer, 4, PointStyle::Scatter, 0.005);

    processor.update(&source);
    processor.sum_to_mono();
    processor.side_image();
    let plot = chart.update(processor.processed_data());

    assert_eq!(plot.num_points(), 4);
    let z: Vec<f32> = plot.data().iter().map(|p| p.z).collect();
    assert_eq!(z, vec![0.5, 0.25, 0.0, -0.25]);
    assert!(plot.data().iter().all(|p| p.x == 0.0 && p.y == 0.5));

    assert_eq!(series.update(&mut renderer, &plot), 4);
    assert_eq!(renderer.points[1].position, Vec3::new(0.0, 0.5, 0.25));
    assert_eq!(renderer.visible_count(), 4);
}

#[test]
fn test_waveform_frame() {
    let source = MockSource::constant(1, 64, 0.5, 0.0);
    let mut renderer = RecordingRenderer::default();
    let mut visualiser =
        Visualiser::new(preset(VisualiserPreset::AudioWaveform, 64), &source, &mut renderer)
            .unwrap();

    assert_eq!(renderer.points.len(), 64);
    assert_eq!(renderer.visible_count(), 0);

    let report = visualiser.tick(&source, &mut renderer);
    assert_eq!(report.frame, 1);
    assert!(!report.skipped);
    assert!(!report.rejected);
    assert_eq!(report.num_points, 64);
    assert_eq!(report.visible, 64);
    assert_eq!(renderer.points[0].position, Vec3::new(0.0, 0.25, -0.5));
}

#[test]
fn test_loud_stereo_waveform_leaves_volume() {
    // 0.6 + 0.6 sums to 1.2, which maps above the top face
    let source = MockSource::constant(2, 64, 0.6, 0.0);
    let mut renderer = RecordingRenderer::default();
    let mut visualiser =
        Visualiser::new(preset(VisualiserPreset::AudioWaveform, 64), &source, &mut renderer)
            .unwrap();

    let report = visualiser.tick(&source, &mut renderer);
    assert_eq!(report.num_points, 64);
    assert_eq!(report.visible, 0);
    assert_eq!(renderer.visible_count(), 0);
}

#[test]
fn test_frames_skipped_while_not_playing() {
    let mut source = MockSource::constant(1, 64, 0.5, 0.0);
    source.playing = false;
    let mut renderer = RecordingRenderer::default();
    let mut visualiser =
        Visualiser::new(preset(VisualiserPreset::AudioWaveform, 64), &source, &mut renderer)
            .unwrap();

    let report = visualiser.tick(&source, &mut renderer);
    assert!(report.skipped);
    assert_eq!(renderer.visible_count(), 0);

    source.playing = true;
    source.position = 0.0;
    assert!(visualiser.tick(&source, &mut renderer).skipped);

    source.position = 0.1;
    let report = visualiser.tick(&source, &mut renderer);
    assert!(!report.skipped);
    assert_eq!(report.frame, 3);
    assert_eq!(visualiser.frame_count(), 3);
}

#[test]
fn test_mid_side_spectrogram() {
    let source = MockSource::new(
        vec![vec![0.0; 1024], vec![0.0; 1024]],
        vec![vec![0.5; 1024], vec![0.25; 1024]],
    );
    let mut renderer = RecordingRenderer::default();
    let mut visualiser = Visualiser::new(
        preset(VisualiserPreset::MidSideSpectrogram, 1024),
        &source,
        &mut renderer,
    )
    .unwrap();

    let report = visualiser.tick(&source, &mut renderer);
    assert_eq!(report.num_points, 762);
    assert_eq!(report.visible, 762);
    assert!(renderer.points.iter().all(|p| p.style == PointStyle::Stretch));

    // side = |0.5 - 0.25| = 0.25 -> about -12 dB
    let side_db = 20.0 * 0.25f32.log10();
    let expected_depth = (side_db / -120.0 / 2.0 - 0.17).abs();
    let first = &renderer.points[0];
    assert!((first.scale.z - expected_depth).abs() < 1e-5);
    assert_eq!(first.scale.x, 0.01);
    assert_eq!(first.position.x, 0.0);

    // The last reduced point sits at reduced index 761, offset by half a pixel
    let last = &renderer.points[761];
    let expected_z = -0.5 - frequency_axis(761, 1024) - 0.005;
    assert!((last.position.z - expected_z).abs() < 1e-6);

    // Everything past the reduced length stays hidden
    assert!(renderer.points[762..].iter().all(|p| !p.visible));
}

#[test]
fn test_mid_side_without_stereo_hides_points() {
    let source = MockSource::constant(1, 1024, 0.0, 0.5);
    let mut renderer = RecordingRenderer::default();
    let mut visualiser = Visualiser::new(
        preset(VisualiserPreset::MidSideSpectrogram, 1024),
        &source,
        &mut renderer,
    )
    .unwrap();

    let report = visualiser.tick(&source, &mut renderer);
    assert_eq!(report.num_points, 762);
    assert_eq!(report.visible, 0);
    assert!(!report.rejected);
}

#[test]
fn test_reduced_frame_forces_tail_hidden() {
    let source = MockSource::constant(1, 1024, 0.0, 0.01);
    let mut renderer = RecordingRenderer::default();
    let mut visualiser = Visualiser::new(
        preset(VisualiserPreset::SpectrogramLogarithmic, 1024),
        &source,
        &mut renderer,
    )
    .unwrap();

    // Something else switched these on behind the pool's back
    for point in &mut renderer.points[800..] {
        point.visible = true;
    }

    let report = visualiser.tick(&source, &mut renderer);
    assert_eq!(report.visible, 762);
    assert!(renderer.points[..762].iter().all(|p| p.visible));
    assert!(renderer.points[762..].iter().all(|p| !p.visible));
    assert_eq!(visualiser.series().visible_count(), 762);
}

#[test]
fn test_instances_keep_separate_peaks() {
    let loud = MockSource::constant(1, 64, 0.0, 4.0);
    let quiet = MockSource::constant(1, 64, 0.0, 1.0);
    let config = preset(VisualiserPreset::SpectrogramLinear, 64);

    let mut renderer_a = RecordingRenderer::default();
    let mut renderer_b = RecordingRenderer::default();
    let mut a = Visualiser::new(config.clone(), &loud, &mut renderer_a).unwrap();
    let mut b = Visualiser::new(config, &quiet, &mut renderer_b).unwrap();

    a.tick(&loud, &mut renderer_a);
    b.tick(&quiet, &mut renderer_b);

    let peak = |chart: &ChartStrategy| match chart {
        ChartStrategy::Scatter(scatter) => scatter.peak().peak(),
        ChartStrategy::ScatterStretch(_) => panic!("expected scatter"),
    };
    assert_eq!(peak(a.chart()), 4.0);
    assert_eq!(peak(b.chart()), 1.0);

    // A quieter frame on the loud instance is normalised to the old peak
    a.tick(&quiet, &mut renderer_a);
    assert_eq!(renderer_a.points[0].position.y, 1.0 / 4.0 - 0.5);
}

#[test]
fn test_unsupported_chart_fails_before_allocation() {
    let source = MockSource::constant(1, 64, 0.0, 0.0);
    let mut renderer = RecordingRenderer::default();
    let config = VisualiserConfig {
        buffer_size: 64,
        chart_type: ChartType::Bar,
        ..Default::default()
    };

    let result = Visualiser::new(config, &source, &mut renderer);
    assert!(matches!(result, Err(CoreError::UnsupportedChart { .. })));
    assert!(renderer.points.is_empty());
}

#[test]
fn test_invalid_buffer_size_fails() {
    let source = MockSource::constant(1, 32, 0.0, 0.0);
    let mut renderer = RecordingRenderer::default();
    let config = VisualiserConfig {
        buffer_size: 32,
        ..Default::default()
    };

    let result = Visualiser::new(config, &source, &mut renderer);
    assert!(matches!(
        result,
        Err(CoreError::InvalidBufferSize { size: 32, .. })
    ));
}

#[test]
fn test_non_finite_samples_are_hidden() {
    let mut time = vec![0.2; 64];
    time[3] = f32::NAN;
    time[7] = f32::INFINITY;
    let source = MockSource::new(vec![time], vec![vec![0.0; 64]]);
    let mut renderer = RecordingRenderer::default();
    let mut visualiser =
        Visualiser::new(preset(VisualiserPreset::AudioWaveform, 64), &source, &mut renderer)
            .unwrap();

    let report = visualiser.tick(&source, &mut renderer);
    assert_eq!(report.visible, 62);
    assert!(!renderer.points[3].visible);
    assert!(!renderer.points[7].visible);
    assert_eq!(renderer.points[3].position, Vec3::ZERO);
}
