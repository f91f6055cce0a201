mod common;

use common::{approx_eq, diffuse_sphere_scene, emissive_sphere_scene, FixedCamera};
use ember::renderer::ray::Ray;
use ember::renderer::sampler::{PathSampler, ShadingMode};
use ember::renderer::scene::{DirectionalLight, Material, Scene, Sphere};
use nalgebra::{Point3, Vector3, Vector4};

fn front_camera() -> FixedCamera {
    FixedCamera::new(Point3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, -1.0), 1, 1)
}

fn assert_color(actual: Vector4<f32>, expected: Vector4<f32>) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(approx_eq(*a, *e, 1e-5), "expected {:?}, got {:?}", expected, actual);
    }
}

#[test]
fn emissive_sphere_single_bounce_is_white() {
    let scene = emissive_sphere_scene();
    let sampler = PathSampler::new(1, ShadingMode::for_scene(&scene));

    let color = sampler.sample(&scene, &front_camera(), 0, 0, 1);

    assert_color(color, Vector4::new(1.0, 1.0, 1.0, 1.0));
}

fn sky_scene() -> Scene {
    Scene {
        spheres: vec![Sphere {
            position: Vector3::new(0.0, 10.0, 0.0),
            radius: 0.5,
            material_index: 0,
        }],
        materials: vec![Material::default()],
        background_color: Vector3::new(0.6, 0.7, 0.9),
        ..Default::default()
    }
}

#[test]
fn emissive_miss_adds_no_light() {
    let scene = sky_scene();
    let sampler = PathSampler::new(5, ShadingMode::Emissive);
    let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));

    assert_color(sampler.trace_path(&scene, ray, 42), Vector4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn directional_miss_returns_background() {
    let scene = sky_scene();
    let mode = ShadingMode::Directional {
        direction: -Vector3::y_axis(),
    };
    let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));

    let color = PathSampler::new(5, mode).trace_path(&scene, ray, 42);

    assert_color(color, Vector4::new(0.6, 0.7, 0.9, 1.0));
}

#[test]
fn zero_bounces_produce_black() {
    let scene = emissive_sphere_scene();
    let sampler = PathSampler::new(0, ShadingMode::Emissive);

    assert_color(
        sampler.sample(&scene, &front_camera(), 0, 0, 7),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );
}

fn tinted_mirror_scene() -> Scene {
    Scene {
        spheres: vec![Sphere {
            position: Vector3::zeros(),
            radius: 0.5,
            material_index: 0,
        }],
        materials: vec![Material {
            albedo: Vector3::new(0.5, 0.25, 1.0),
            roughness: 0.0,
            ..Default::default()
        }],
        background_color: Vector3::new(1.0, 1.0, 1.0),
        ..Default::default()
    }
}

#[test]
fn throughput_scales_light_from_later_bounces() {
    // 거칠기 0이면 법선 방향으로 튕겨서 바로 하늘로 나감
    let scene = tinted_mirror_scene();

    // 발광 모드에서는 하늘이 어두우니 아무 빛도 모이지 않음
    let color = PathSampler::new(2, ShadingMode::Emissive).sample(&scene, &front_camera(), 0, 0, 3);
    assert_color(color, Vector4::new(0.0, 0.0, 0.0, 1.0));

    // 빛이 표면 뒤쪽에서 오면 직접광은 0, 튕긴 뒤 하늘빛만 albedo만큼 줄어서 들어옴
    let mode = ShadingMode::Directional {
        direction: Vector3::z_axis(),
    };
    let color = PathSampler::new(2, mode).sample(&scene, &front_camera(), 0, 0, 3);
    assert_color(color, Vector4::new(0.5, 0.25, 1.0, 1.0));
}

#[test]
fn emitted_light_is_scaled_by_earlier_albedo() {
    let mut scene = tinted_mirror_scene();
    scene.spheres.push(Sphere {
        position: Vector3::new(0.0, 0.0, 3.0),
        radius: 0.5,
        material_index: 1,
    });
    scene.materials.push(Material {
        emission_color: Vector3::new(1.0, 1.0, 1.0),
        emission_power: 1.0,
        ..Default::default()
    });

    // 카메라와 거울 사이에서 정면으로 쏴서 되돌아온 광선이 발광 구에 닿음
    let ray = Ray::new(Point3::new(0.0, 0.0, 1.5), Vector3::new(0.0, 0.0, -1.0));
    let color = PathSampler::new(2, ShadingMode::Emissive).trace_path(&scene, ray, 3);

    assert_color(color, Vector4::new(0.5, 0.25, 1.0, 1.0));
}

#[test]
fn bounce_limit_cuts_the_path() {
    let scene = Scene {
        spheres: vec![Sphere {
            position: Vector3::zeros(),
            radius: 0.5,
            material_index: 0,
        }],
        materials: vec![Material {
            roughness: 0.0,
            ..Default::default()
        }],
        background_color: Vector3::new(1.0, 1.0, 1.0),
        ..Default::default()
    };

    let mode = ShadingMode::Directional {
        direction: Vector3::z_axis(),
    };

    // 첫 충돌에서 예산을 다 쓰면 하늘빛을 받지 못함
    let color = PathSampler::new(1, mode).sample(&scene, &front_camera(), 0, 0, 3);
    assert_color(color, Vector4::new(0.0, 0.0, 0.0, 1.0));

    let color = PathSampler::new(2, mode).sample(&scene, &front_camera(), 0, 0, 3);
    assert_color(color, Vector4::new(1.0, 1.0, 1.0, 1.0));
}

#[test]
fn emission_is_color_times_power() {
    let mut scene = emissive_sphere_scene();
    scene.materials[0].emission_color = Vector3::new(0.25, 0.5, 0.1);
    scene.materials[0].emission_power = 2.0;

    let color = PathSampler::new(1, ShadingMode::Emissive).sample(&scene, &front_camera(), 0, 0, 1);

    assert_color(color, Vector4::new(0.5, 1.0, 0.2, 1.0));
}

#[test]
fn directional_light_shades_by_cosine() {
    let mut scene = emissive_sphere_scene();
    scene.materials[0] = Material {
        albedo: Vector3::new(1.0, 0.5, 0.25),
        roughness: 0.0,
        ..Default::default()
    };
    scene.directional_light = Some(DirectionalLight {
        direction: Vector3::new(0.0, 0.0, -1.0),
        enabled: true,
    });

    let mode = ShadingMode::for_scene(&scene);
    assert!(matches!(mode, ShadingMode::Directional { .. }));

    let color = PathSampler::new(1, mode).sample(&scene, &front_camera(), 0, 0, 1);
    assert_color(color, Vector4::new(1.0, 0.5, 0.25, 1.0));
}

#[test]
fn directional_light_ignores_back_facing_surfaces() {
    let mut scene = emissive_sphere_scene();
    scene.materials[0].roughness = 0.0;
    scene.directional_light = Some(DirectionalLight {
        direction: Vector3::new(0.0, 0.0, 1.0),
        enabled: true,
    });

    let color = PathSampler::new(1, ShadingMode::for_scene(&scene))
        .sample(&scene, &front_camera(), 0, 0, 1);
    assert_color(color, Vector4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn disabled_light_keeps_emissive_mode() {
    let mut scene = emissive_sphere_scene();
    scene.directional_light = Some(DirectionalLight::default());

    assert_eq!(ShadingMode::for_scene(&scene), ShadingMode::Emissive);
}

#[test]
fn same_seed_same_sample() {
    let scene = diffuse_sphere_scene();
    let sampler = PathSampler::new(5, ShadingMode::Emissive);
    let ray = Ray::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));

    let first = sampler.trace_path(&scene, ray, 1234);
    let second = sampler.trace_path(&scene, ray, 1234);

    assert_eq!(first, second);
}

#[test]
fn rough_surfaces_vary_with_seed() {
    let scene = diffuse_sphere_scene();
    let sampler = PathSampler::new(5, ShadingMode::Emissive);
    let ray = Ray::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));

    let samples = (1..=16)
        .map(|seed| sampler.trace_path(&scene, ray, seed))
        .collect::<Vec<_>>();

    assert!(samples.iter().any(|sample| *sample != samples[0]));
    for sample in &samples {
        assert!(sample.x >= 0.0 && sample.x <= 1.0);
        assert_eq!(sample.w, 1.0);
    }
}
