//! Whole-image renders of small scenes.

use glint_core::{load_scene_from_str, Attenuation, CameraSettings, Color, LightKind, SceneBuilder};
use glint_math::{Frame, Vec3};
use glint_renderer::{Progressive, Scene};

fn camera(width: u32, height: u32) -> CameraSettings {
    CameraSettings {
        width,
        height,
        eye: Vec3::new(0.0, 0.0, 5.0),
        look_at: Vec3::ZERO,
        up: Vec3::Y,
        fovy: 45.0,
    }
}

#[test]
fn empty_scene_renders_black() {
    let mut scene = Scene::new(SceneBuilder::new(camera(8, 6)).build());
    Progressive::new(&mut scene).run(3);

    assert!(scene.image().pixels.iter().all(|&p| p == Color::ZERO));
    assert!(scene.image().to_rgb8().iter().all(|&b| b == 0));
}

#[test]
fn single_sphere_matches_lambert() {
    let ambient = Color::splat(0.1);
    let diffuse = Color::new(0.8, 0.4, 0.2);
    let light_dir = Vec3::new(1.0, 1.0, 1.0).normalize();

    let mut builder = SceneBuilder::new(camera(9, 9)).with_ambient(ambient);
    builder.add_light(Color::ONE, LightKind::Directional { direction: light_dir });
    let mat = builder.material(diffuse, Color::ZERO, 1.0);
    let sphere = builder.sphere(mat, 1.0, Frame::IDENTITY);
    builder.push(sphere);

    let mut scene = Scene::new(builder.build());
    scene.render(1);

    // The center pixel sees the front pole, normal +Z
    let cos = light_dir.dot(Vec3::Z);
    let expected = ambient * diffuse + diffuse * cos;
    let center = scene.image().get(4, 4);
    assert!((center - expected).length() < 1e-4, "{:?} vs {:?}", center, expected);

    // Corners miss the sphere
    assert_eq!(scene.image().get(0, 0), Color::ZERO);
    assert_eq!(scene.image().get(8, 8), Color::ZERO);
}

#[test]
fn neg_y_directional_light_grazes_front_pole() {
    let ambient = Color::splat(0.1);
    let diffuse = Color::new(0.8, 0.4, 0.2);

    let mut builder = SceneBuilder::new(camera(9, 9)).with_ambient(ambient);
    // Light arriving from below the sphere
    builder.add_light(Color::ONE, LightKind::Directional { direction: Vec3::NEG_Y });
    let mat = builder.material(diffuse, Color::ZERO, 1.0);
    let sphere = builder.sphere(mat, 1.0, Frame::IDENTITY);
    builder.push(sphere);

    let mut scene = Scene::new(builder.build());
    scene.render(1);

    // Normal +Z is perpendicular to the light, only ambient remains
    let center = scene.image().get(4, 4);
    let expected = ambient * diffuse;
    assert!((center - expected).length() < 1e-4, "{:?} vs {:?}", center, expected);

    // The underside faces the light, the top only gets ambient
    let below = scene.image().get(4, 2);
    let above = scene.image().get(4, 6);
    assert!(below.x > expected.x + 0.1, "{:?}", below);
    assert!((above - expected).length() < 1e-4, "{:?}", above);
}

#[test]
fn fixed_rays_accumulate_to_single_sample() {
    let mut builder = SceneBuilder::new(camera(12, 8)).with_sampling(false, 5);
    builder.add_light(
        Color::new(1.0, 0.9, 0.8),
        LightKind::Point {
            position: Vec3::new(2.0, 3.0, 4.0),
            attenuation: Attenuation::from_array([0.0, 0.1, 1.0]),
        },
    );
    let red = builder.material(Color::new(0.9, 0.1, 0.1), Color::splat(0.5), 16.0);
    let grey = builder.material(Color::splat(0.5), Color::ZERO, 1.0);
    let sphere = builder.sphere(red, 1.0, Frame::IDENTITY);
    builder.push(sphere);
    let floor = builder.plane(grey, None, Vec3::Y, Frame::from_trs(Vec3::new(0.0, -1.0, 0.0), Vec3::ZERO, Vec3::ONE));
    builder.push(floor);
    let description = builder.build();

    let mut once = Scene::new(description.clone());
    once.render(1);

    let mut many = Scene::new(description);
    let samples = many.description.samples;
    Progressive::new(&mut many).run(samples);

    assert_eq!(once.image().pixels, many.image().pixels);
}

#[test]
fn jittered_mean_converges() {
    // Half the frame is a bright wall; the edge pixel averages its coverage
    let mut builder = SceneBuilder::new(camera(2, 1))
        .with_ambient(Color::ONE)
        .with_sampling(true, -1);
    let white = builder.material(Color::ONE, Color::ZERO, 1.0);
    let wall = builder.aabox(
        white,
        Vec3::new(0.0, -10.0, -1.0),
        Vec3::new(10.0, 10.0, 0.0),
        Frame::IDENTITY,
    );
    builder.push(wall);
    let mut scene = Scene::new(builder.build());

    let mut driver = Progressive::new(&mut scene);
    driver.run_until(|i, _| i < 400);

    let left = scene.image().get(0, 0);
    let right = scene.image().get(1, 0);

    // Left pixel never sees the wall, right pixel always does
    assert_eq!(left, Color::ZERO);
    assert!((right - Color::ONE).length() < 1e-4);
    assert!(scene.image().pixels.iter().all(|p| p.is_finite()));
}

#[test]
fn jittered_edge_pixel_averages_coverage() {
    let mut builder = SceneBuilder::new(camera(1, 1))
        .with_ambient(Color::ONE)
        .with_sampling(true, 0);
    let white = builder.material(Color::ONE, Color::ZERO, 1.0);
    let wall = builder.aabox(
        white,
        Vec3::new(0.0, -10.0, -1.0),
        Vec3::new(10.0, 10.0, 0.0),
        Frame::IDENTITY,
    );
    builder.push(wall);
    let mut scene = Scene::new(builder.build());

    Progressive::new(&mut scene).run_until(|i, _| i < 2000);

    // The wall covers the right half of the only pixel
    let mean = scene.image().get(0, 0).x;
    assert!((mean - 0.5).abs() < 0.1, "mean {}", mean);
}

#[test]
fn occluder_shadows_floor() {
    let json = r#"{
        "resolution": [16, 16],
        "ambient": [0.1, 0.1, 0.1],
        "camera": { "position": [0, 10, 0], "lookAt": [0, 0, 0], "up": [0, 0, -1], "fovy": 20 },
        "lights": [ { "type": "point", "position": [0, 6, 0], "colour": [1, 1, 1] } ],
        "materials": [ { "name": "white", "diffuse": [1, 1, 1] } ],
        "objects": [
            { "type": "plane", "normal": [0, 1, 0], "materials": ["white"] },
            { "type": "sphere", "radius": 0.5, "position": [0, 3, 0], "materials": ["white"] }
        ]
    }"#;
    let description = load_scene_from_str(json, 1.0).unwrap();
    let mut scene = Scene::new(description);
    scene.render(1);

    // Looking straight down, the ring around the sphere shows lit floor
    let lit = scene.image().get(1, 1);
    assert!(lit.x > 0.5, "floor should be lit, got {:?}", lit);

    // Floor points in the sphere's shadow keep only the ambient term
    let shadow_ray = glint_math::Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Y);
    let hit = glint_renderer::Intersection::hit(
        10.0,
        Vec3::ZERO,
        Vec3::Y,
        glint_core::Material::diffuse(0, Color::ONE),
    );
    let shaded = scene.compute_shading(&hit, &shadow_ray);
    assert!((shaded - Color::splat(0.1)).length() < 1e-6);
}
