use clap::Parser;
use crossterm::{cursor, ExecutableCommand, QueueableCommand};
use std::error::Error;
use std::io::{stdout, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use ultraviolet::Vec3;

mod framebuffer;
mod materials;
mod primitives;
mod sampling;
mod shading;
mod surfaces;

use framebuffer::FrameBuffer;
use materials::Material;
use primitives::{Ray, Sphere, Triangle, FAR};
use sampling::{JitterTable, GRID};
use shading::{shade, TraceOptions, World};
use surfaces::{Scene, SphereSurface, Surface, TriangleSurface};

#[derive(Parser, Debug)]
#[clap(about = "Sequential Whitted-style raytracer written in rust")]
struct CliArguments {
    #[clap(short = 'w', long, default_value = "512", value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[clap(short = 'h', long, default_value = "512", value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    #[clap(short = 'o', long, default_value = "render.png")]
    output: String,

    #[clap(short = 'd', long, default_value = "3")]
    depth: u32,

    #[clap(long, action)]
    no_shadows: bool,

    #[clap(long, action)]
    no_reflection: bool,

    #[clap(long, action)]
    antialias: bool,
}

/// View rectangle on the z = 0 plane the image maps onto.
struct ViewPlane {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

/// Primary-ray color for view-plane coordinates `(u, v)` measured in
/// pixels from the bottom-left corner.
fn trace_sample(
    world: &World,
    eye: Vec3,
    view: &ViewPlane,
    width: usize,
    height: usize,
    u: f32,
    v: f32,
    opts: &TraceOptions,
) -> Vec3 {
    let x = view.left + (view.right - view.left) * u / width as f32;
    let y = view.bottom + (view.top - view.bottom) * v / height as f32;
    // The ray aims at a point on the z = 0 view plane; the direction keeps
    // a constant z of -eye.z and is not normalized.
    let ray = Ray {
        origin: eye,
        direction: Vec3::new(x, y, 0.0) - eye,
    };
    shade(world, &ray, 0.0, FAR, opts.reflection_depth, opts)
}

#[allow(clippy::too_many_arguments)]
fn render_pixel(
    world: &World,
    eye: Vec3,
    view: &ViewPlane,
    width: usize,
    height: usize,
    row: usize,
    col: usize,
    opts: &TraceOptions,
    antialias: bool,
    jitter: &mut JitterTable,
) -> Vec3 {
    if antialias {
        let mut sum = Vec3::zero();
        for _ in 0..GRID * GRID {
            let u = col as f32 + jitter.next();
            let v = row as f32 + jitter.next();
            sum += trace_sample(world, eye, view, width, height, u, v, opts);
        }
        sum / (GRID * GRID) as f32
    } else {
        trace_sample(
            world,
            eye,
            view,
            width,
            height,
            col as f32 + 0.5,
            row as f32 + 0.5,
            opts,
        )
    }
}

fn build_scene() -> (World, Vec3, ViewPlane) {
    let red = Material {
        diffuse: Vec3::new(0.8, 0.25, 0.2),
        specular: Vec3::new(0.4, 0.4, 0.4),
        ambient: Vec3::new(0.08, 0.03, 0.02),
        shininess: 32.0,
        mirror: 0.0,
    };
    let blue = Material {
        diffuse: Vec3::new(0.2, 0.3, 0.8),
        specular: Vec3::new(0.5, 0.5, 0.5),
        ambient: Vec3::new(0.02, 0.03, 0.08),
        shininess: 64.0,
        mirror: 0.0,
    };
    let chrome = Material {
        diffuse: Vec3::new(0.1, 0.1, 0.1),
        specular: Vec3::new(0.8, 0.8, 0.8),
        ambient: Vec3::new(0.02, 0.02, 0.02),
        shininess: 256.0,
        mirror: 0.7,
    };
    let floor = Material {
        diffuse: Vec3::new(0.6, 0.6, 0.6),
        specular: Vec3::new(0.2, 0.2, 0.2),
        ambient: Vec3::new(0.05, 0.05, 0.05),
        shininess: 8.0,
        mirror: 0.15,
    };

    let objects: Vec<Box<dyn Surface>> = vec![
        Box::new(SphereSurface {
            sphere: Sphere {
                center: Vec3::new(-1.8, 0.0, -6.0),
                radius: 1.0,
            },
            mat: red,
        }),
        Box::new(SphereSurface {
            sphere: Sphere {
                center: Vec3::new(0.2, 0.2, -7.5),
                radius: 1.2,
            },
            mat: chrome,
        }),
        Box::new(SphereSurface {
            sphere: Sphere {
                center: Vec3::new(1.9, -0.4, -5.5),
                radius: 0.6,
            },
            mat: blue,
        }),
        Box::new(TriangleSurface {
            tri: Triangle {
                v0: Vec3::new(-8.0, -1.0, 0.0),
                v1: Vec3::new(8.0, -1.0, 0.0),
                v2: Vec3::new(8.0, -1.0, -12.0),
            },
            mat: floor,
        }),
        Box::new(TriangleSurface {
            tri: Triangle {
                v0: Vec3::new(-8.0, -1.0, 0.0),
                v1: Vec3::new(8.0, -1.0, -12.0),
                v2: Vec3::new(-8.0, -1.0, -12.0),
            },
            mat: floor,
        }),
    ];

    let world = World {
        scene: Scene { objects },
        light: Vec3::new(-3.0, 6.0, 2.0),
        background: Vec3::new(0.04, 0.05, 0.1),
    };
    let eye = Vec3::new(0.0, 0.8, 4.0);
    let view = ViewPlane {
        left: -1.0,
        right: 1.0,
        bottom: -1.0,
        top: 1.0,
    };
    (world, eye, view)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArguments::parse();

    let exit_flag = Arc::new(AtomicBool::new(false));
    {
        let handler_exit_flag = exit_flag.clone();
        ctrlc::set_handler(move || {
            let mut stdout = stdout();
            stdout.execute(cursor::Show).unwrap();
            handler_exit_flag.store(true, Ordering::Relaxed)
        })?;
    }

    let (world, eye, view) = build_scene();
    let opts = TraceOptions {
        shadows: !args.no_shadows,
        reflection: !args.no_reflection,
        reflection_depth: args.depth,
    };

    let mut frame = FrameBuffer::new(args.width as usize, args.height as usize);
    let mut jitter = if args.antialias {
        JitterTable::stratified()
    } else {
        JitterTable::centered()
    };

    let mut stdout = stdout();
    stdout.execute(cursor::Hide)?;
    let start_time = Instant::now();

    println!("\nStarting render");
    println!("\tImage size: {}x{}", args.width, args.height);
    println!(
        "\tShadows:    {}",
        if opts.shadows { "on" } else { "off" }
    );
    println!(
        "\tReflection: {}",
        if opts.reflection {
            format!("depth {}", opts.reflection_depth)
        } else {
            "off".to_string()
        }
    );
    println!(
        "\tSampling:   {}",
        if args.antialias {
            format!("{}x{} stratified", GRID, GRID)
        } else {
            "1 per pixel".to_string()
        }
    );
    println!();

    let (width, height) = (frame.width(), frame.height());
    for row in 0..height {
        if exit_flag.load(Ordering::Relaxed) {
            stdout.execute(cursor::Show)?;
            println!("\nRender interrupted");
            return Ok(());
        }

        for col in 0..width {
            let color = render_pixel(
                &world,
                eye,
                &view,
                width,
                height,
                row,
                col,
                &opts,
                args.antialias,
                &mut jitter,
            );
            frame.set_pixel(row, col, color);
        }

        let elapsed = start_time.elapsed().as_secs_f32();
        let msg = format!("{}/{} scanlines in {elapsed:0.2}s", row + 1, height);
        stdout.queue(cursor::SavePosition)?;
        stdout.write_all(msg.as_bytes())?;
        stdout.queue(cursor::RestorePosition)?;
        stdout.flush()?;
    }

    let duration = start_time.elapsed().as_secs_f32();
    stdout.execute(cursor::Show)?;
    println!("Rendered {height} scanlines in {duration:0.2}s");
    frame.save(Path::new(&args.output))?;
    println!("Image saved to \"{}\"", args.output);
    Ok(())
}
