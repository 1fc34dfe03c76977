mod common;

use common::png;
use recipe_cards::config::LayoutConfig;
use recipe_cards::layout::{wait_all, Dimensions, HttpImageLoader, ImageLoad, LayoutController, Masonry};
use std::sync::Arc;

#[tokio::test]
async fn test_served_image_sizes_drive_tile_heights() {
    let mut server = mockito::Server::new_async().await;
    let _tall = server
        .mock("GET", "/tall.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(png(100, 400))
        .create_async()
        .await;
    let _wide = server
        .mock("GET", "/wide.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(png(400, 100))
        .create_async()
        .await;

    let sources = vec![
        Some(format!("{}/tall.png", server.url())),
        Some(format!("{}/wide.png", server.url())),
    ];
    let loader = Arc::new(HttpImageLoader::new().unwrap());
    let loads = wait_all(loader, &sources).await;
    assert_eq!(
        loads,
        vec![
            ImageLoad::Loaded(Some(Dimensions {
                width: 100,
                height: 400
            })),
            ImageLoad::Loaded(Some(Dimensions {
                width: 400,
                height: 100
            })),
        ]
    );

    // 800px wide: two 400px columns, 120px card body
    let grid = Masonry::layout(800, &loads, &LayoutConfig::default());
    let heights: Vec<f64> = grid.placements().iter().map(|p| p.height).collect();
    assert_eq!(heights, vec![1720.0, 220.0]);
}

#[tokio::test]
async fn test_controller_lays_out_after_downloads() {
    let mut server = mockito::Server::new_async().await;
    let _square = server
        .mock("GET", "/square.png")
        .with_status(200)
        .with_body(png(300, 300))
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/gone.png")
        .with_status(404)
        .create_async()
        .await;

    let mut controller = LayoutController::new(
        Arc::new(HttpImageLoader::new().unwrap()),
        LayoutConfig::default(),
        1200,
    );
    let sources = vec![
        Some(format!("{}/square.png", server.url())),
        Some(format!("{}/gone.png", server.url())),
    ];

    let grid = controller.relayout(&sources).await;
    // 1200px wide: four 300px columns
    assert_eq!(grid.placements()[0].height, 420.0);
    assert_eq!(grid.placements()[1].height, 120.0);
}
