use futures::Future;
use futures::task::{Context, Poll};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::util::BoxService;
use tower::{BoxError, Service, ServiceBuilder};
use tracing::{info, warn};

use crate::common::Frame;
use crate::error::AppError;
use crate::pipeline::orchestration::{ProcessingPipeline, TaskContext};
use crate::pipeline::services::factory::TaskParams;
use crate::pipeline::types::{TaskOutput, TaskVariant};

/// One configured instance of the image-properties task.
///
/// Cheap to clone: clones share the same pipeline and annotation client.
#[derive(Clone)]
pub struct ImagePropertiesTask {
    name: String,
    params: TaskParams,
    pipeline: Arc<ProcessingPipeline>,
}

impl ImagePropertiesTask {
    pub fn new(name: String, params: TaskParams, pipeline: ProcessingPipeline) -> Self {
        Self {
            name,
            params,
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &TaskParams {
        &self.params
    }

    /// Number of progress ticks the host should expect per run.
    pub fn progress_steps(&self) -> usize {
        1
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.pipeline.step_names()
    }

    /// Process a single frame through the pipeline
    pub async fn run(&self, frame: Frame) -> Result<TaskOutput, AppError> {
        Self::run_pipeline(&self.pipeline, &self.name, self.params.variant, frame).await
    }

    async fn run_pipeline(
        pipeline: &ProcessingPipeline,
        name: &str,
        variant: TaskVariant,
        frame: Frame,
    ) -> Result<TaskOutput, AppError> {
        let captured_at = frame.captured_at();
        let context = TaskContext::new(frame, variant);
        let task_id = context.task_id;
        info!(
            "Running {} as task {} on frame captured at {}",
            name, task_id, captured_at
        );

        let output = match pipeline.process(context).await {
            Ok(context) => context.into_output()?,
            Err(e) => {
                warn!("Task {} failed: {}", task_id, e);
                return Err(e);
            }
        };

        info!(
            "Task {} finished in {}us",
            task_id, output.metrics.total_processing_duration_us
        );
        Ok(output)
    }

    /// Boxed service with an optional deadline around every run.
    pub fn into_service(self, timeout: Option<Duration>) -> BoxService<Frame, TaskOutput, BoxError> {
        let service = ServiceBuilder::new()
            .option_layer(timeout.map(TimeoutLayer::new))
            .map_err(BoxError::from)
            .service(self);
        BoxService::new(service)
    }
}

impl Service<Frame> for ImagePropertiesTask {
    type Response = TaskOutput;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, frame: Frame) -> Self::Future {
        let pipeline = Arc::clone(&self.pipeline);
        let name = self.name.clone();
        let variant = self.params.variant;

        Box::pin(async move { Self::run_pipeline(&pipeline, &name, variant, frame).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ChannelOrder, DetectedObject, Vertex};
    use crate::config::Configuration;
    use crate::error::ServiceError;
    use crate::network::types::{
        BoundingPoly, Color, ColorInfo, CropHint, CropHintsAnnotation, DominantColorsAnnotation,
        ImageProperties,
    };
    use crate::network::{AnnotateImageResponse, Feature, ImageAnnotator};
    use crate::pipeline::services::factory::{ImagePropertiesFactory, TaskFactory};
    use crate::pipeline::steps::{CROP_HINTS_KEY, IMAGE_PROPERTIES_KEY};
    use async_trait::async_trait;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct FakeAnnotator {
        response: Result<AnnotateImageResponse, u16>,
        delay: Option<Duration>,
        requests: Mutex<Vec<(usize, Vec<Feature>)>>,
    }

    impl FakeAnnotator {
        fn replying(response: AnnotateImageResponse) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response),
                delay: None,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                response: Err(status),
                delay: None,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ImageAnnotator for FakeAnnotator {
        async fn annotate(
            &self,
            content: &[u8],
            features: &[Feature],
        ) -> Result<AnnotateImageResponse, AppError> {
            self.requests
                .lock()
                .unwrap()
                .push((content.len(), features.to_vec()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(status) => Err(ServiceError::HttpStatus {
                    status: *status,
                    body: "unavailable".to_string(),
                }
                .into()),
            }
        }
    }

    fn color_info(rgb: [f32; 3], pixel_fraction: f32) -> ColorInfo {
        ColorInfo {
            color: Color {
                red: rgb[0],
                green: rgb[1],
                blue: rgb[2],
                alpha: None,
            },
            score: pixel_fraction,
            pixel_fraction,
        }
    }

    fn properties_response(colors: Vec<ColorInfo>) -> AnnotateImageResponse {
        AnnotateImageResponse {
            image_properties_annotation: Some(ImageProperties {
                dominant_colors: DominantColorsAnnotation { colors },
            }),
            ..AnnotateImageResponse::default()
        }
    }

    fn with_crop_hint(
        mut response: AnnotateImageResponse,
        corners: &[(i32, i32)],
    ) -> AnnotateImageResponse {
        response.crop_hints_annotation = Some(CropHintsAnnotation {
            crop_hints: vec![CropHint {
                bounding_poly: BoundingPoly {
                    vertices: corners.iter().map(|&(x, y)| Vertex::new(x, y)).collect(),
                },
                confidence: 0.9,
                importance_fraction: 1.0,
            }],
        });
        response
    }

    fn reference_colors() -> Vec<ColorInfo> {
        vec![
            color_info([255.0, 0.0, 0.0], 0.5),
            color_info([0.0, 255.0, 0.0], 0.25),
            color_info([0.0, 0.0, 255.0], 0.25),
        ]
    }

    fn task_with(annotator: Arc<dyn ImageAnnotator>, params: TaskParams) -> ImagePropertiesTask {
        ImagePropertiesFactory::new(Configuration::default())
            .with_annotator(annotator)
            .create(Some(params))
            .unwrap()
    }

    fn small_params() -> TaskParams {
        TaskParams {
            strip_width: 100,
            strip_height: 10,
            ..TaskParams::default()
        }
    }

    fn input_frame() -> Frame {
        Frame::new(
            DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
                64,
                48,
                Rgb([30, 60, 90]),
            )),
            ChannelOrder::Bgr,
        )
    }

    #[tokio::test]
    async fn test_image_properties_run() {
        let annotator = FakeAnnotator::replying(properties_response(reference_colors()));
        let task = task_with(annotator.clone(), small_params());

        let output = task.run(input_frame()).await.unwrap();

        assert_eq!(output.strip.dimensions(), (100, 10));
        assert_eq!(output.strip.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(output.strip.get_pixel(49, 5).0, [255, 0, 0]);
        assert_eq!(output.strip.get_pixel(50, 5).0, [0, 255, 0]);
        assert_eq!(output.strip.get_pixel(99, 9).0, [0, 0, 255]);
        assert!(output.detection.is_none());

        let text = &output.data[IMAGE_PROPERTIES_KEY];
        assert!(text.contains("dominantColors"));
        assert!(!output.data.contains_key(CROP_HINTS_KEY));

        let requests = annotator.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0 > 0);
        assert_eq!(requests[0].1, vec![Feature::ImageProperties]);
    }

    #[tokio::test]
    async fn test_crop_hints_run_forwards_selected_area() {
        let response = with_crop_hint(
            properties_response(reference_colors()),
            &[(10, 20), (110, 20), (110, 220), (10, 220)],
        );
        let annotator = FakeAnnotator::replying(response);
        let params = TaskParams {
            variant: TaskVariant::CropHints,
            ..small_params()
        };
        let task = task_with(annotator.clone(), params);
        let frame = input_frame();
        let original = frame.shared_image();

        let output = task.run(frame).await.unwrap();

        let (image, object) = output.detection.expect("crop hint detection");
        assert!(Arc::ptr_eq(&image, &original));
        assert_eq!(object.label, DetectedObject::SELECTED_AREA);
        assert_eq!(object.confidence, 1.0);
        assert_eq!(
            (object.bbox.x, object.bbox.y, object.bbox.width, object.bbox.height),
            (10, 20, 100, 200)
        );
        assert_eq!(object.display_color, [255, 0, 0]);
        assert!(output.data.contains_key(CROP_HINTS_KEY));

        let requests = annotator.requests.lock().unwrap();
        assert_eq!(
            requests[0].1,
            vec![Feature::ImageProperties, Feature::CropHints]
        );
    }

    #[tokio::test]
    async fn test_malformed_crop_hint_fails_task() {
        let response = with_crop_hint(properties_response(reference_colors()), &[(10, 20)]);
        let params = TaskParams {
            variant: TaskVariant::CropHints,
            ..small_params()
        };
        let task = task_with(FakeAnnotator::replying(response), params);

        let result = task.run(input_frame()).await;
        assert!(matches!(result, Err(AppError::MalformedRegion(_))));
    }

    #[tokio::test]
    async fn test_service_error_is_not_retried() {
        let annotator = FakeAnnotator::failing(503);
        let task = task_with(annotator.clone(), small_params());

        let result = task.run(input_frame()).await;
        assert!(matches!(
            result,
            Err(AppError::Service(ServiceError::HttpStatus { status: 503, .. }))
        ));
        assert_eq!(annotator.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_palette_is_degenerate() {
        let annotator = FakeAnnotator::replying(AnnotateImageResponse::default());
        let task = task_with(annotator, small_params());

        let result = task.run(input_frame()).await;
        assert!(matches!(result, Err(AppError::DegenerateInput(_))));
    }

    #[tokio::test]
    async fn test_task_as_tower_service() {
        let annotator = FakeAnnotator::replying(properties_response(reference_colors()));
        let task = task_with(annotator, small_params());

        let output = task.oneshot(input_frame()).await.unwrap();
        assert_eq!(output.strip.width(), 100);
    }

    #[tokio::test]
    async fn test_boxed_service_keeps_task_errors() {
        let service = task_with(FakeAnnotator::failing(503), small_params()).into_service(None);

        let error = service.oneshot(input_frame()).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<AppError>(),
            Some(AppError::Service(ServiceError::HttpStatus { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_boxed_service_with_deadline_passes_output_through() {
        let annotator = FakeAnnotator::replying(properties_response(reference_colors()));
        let service =
            task_with(annotator, small_params()).into_service(Some(Duration::from_secs(5)));

        let output = service.oneshot(input_frame()).await.unwrap();
        assert_eq!(output.strip.dimensions(), (100, 10));
        assert!(output.data.contains_key(IMAGE_PROPERTIES_KEY));
    }

    #[tokio::test]
    async fn test_boxed_service_times_out() {
        let annotator = Arc::new(FakeAnnotator {
            response: Ok(properties_response(reference_colors())),
            delay: Some(Duration::from_millis(200)),
            requests: Mutex::new(Vec::new()),
        });
        let service = task_with(annotator, small_params())
            .into_service(Some(Duration::from_millis(10)));

        let error = service.oneshot(input_frame()).await.unwrap_err();
        assert!(error.is::<tower::timeout::error::Elapsed>());
    }
}
