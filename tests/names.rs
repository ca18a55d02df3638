extern crate rand;
extern crate softgl;

use std::collections::HashSet;
use std::rc::Rc;

use softgl::prelude::*;
use softgl::utils::NameAllocator;

fn context() -> Context<HeadlessDevice> {
    Context::new(HeadlessDevice::new(HeadlessParams::default()))
}

#[test]
fn allocate_distinct_names() {
    let mut names = NameAllocator::new();
    let mut alive = HashSet::new();

    for _ in 0..50 {
        let n = rand::random::<usize>() % 16;
        for v in names.allocate(n) {
            assert!(v != 0);
            assert!(alive.insert(v));
        }

        let frees = rand::random::<usize>() % (alive.len() + 1);
        let victims: Vec<_> = alive.iter().cloned().take(frees).collect();
        for v in victims {
            assert!(names.free(v));
            alive.remove(&v);
        }

        assert_eq!(names.len(), alive.len());
    }
}

#[test]
fn gen_textures() {
    let mut ctx = context();

    let names = ctx.gen_textures(4);
    assert_eq!(names, vec![1, 2, 3, 4]);
    assert!(names.iter().all(|&v| !ctx.is_texture(v)));

    assert!(ctx.gen_textures(-1).is_empty());
    assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
    assert!(ctx.gen_textures(0).is_empty());
    assert_eq!(ctx.get_error(), None);
}

#[test]
fn bind_materializes_objects() {
    let mut ctx = context();
    let names = ctx.gen_textures(1);

    ctx.bind_texture(GL_TEXTURE_2D, names[0]);
    assert!(ctx.is_texture(names[0]));

    let texture = ctx.texture(names[0]).unwrap();
    assert!(ctx.active_texture_unit().is_bound(&texture));

    // Binding again does not create another object.
    ctx.bind_texture(GL_TEXTURE_2D, names[0]);
    assert!(Rc::ptr_eq(&texture, &ctx.texture(names[0]).unwrap()));

    ctx.bind_texture(GL_TEXTURE_2D, 0);
    assert!(ctx.active_texture_unit().is_bound(ctx.default_texture_2d()));
    assert!(!ctx.is_texture(0));
    assert_eq!(ctx.get_error(), None);
}

#[test]
fn bind_unknown_names() {
    let mut ctx = context();

    ctx.bind_texture(GL_TEXTURE_2D, 42);
    assert_eq!(ctx.get_error(), None);
    assert!(ctx.is_texture(42));

    // The name is in use, so it is never generated.
    for _ in 0..64 {
        assert!(!ctx.gen_textures(1).contains(&42));
    }

    let params = ContextParams {
        implicit_texture_names: false,
    };

    let device = HeadlessDevice::new(HeadlessParams::default());
    let mut ctx = Context::with_params(device, params);
    ctx.bind_texture(GL_TEXTURE_2D, 42);
    assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));
    assert!(!ctx.is_texture(42));
}

#[test]
fn bind_targets() {
    let mut ctx = context();

    ctx.bind_texture(GL_TEXTURE_3D, 1);
    assert_eq!(ctx.get_error(), None);
    assert!(!ctx.is_texture(1));

    ctx.bind_texture(GL_RGBA, 1);
    assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
}

#[test]
fn delete_reverts_units() {
    let mut ctx = context();
    let names = ctx.gen_textures(2);

    ctx.bind_texture(GL_TEXTURE_2D, names[0]);
    ctx.active_texture(GL_TEXTURE1);
    ctx.bind_texture(GL_TEXTURE_2D, names[0]);

    let texture = ctx.texture(names[0]).unwrap();
    ctx.delete_textures(&[names[0]]);
    assert_eq!(ctx.get_error(), None);

    assert!(!ctx.is_texture(names[0]));
    assert!(ctx.texture(names[0]).is_none());
    for unit in ctx.texture_units() {
        assert!(!unit.is_bound(&texture));
        assert!(unit.is_bound(ctx.default_texture_2d()));
    }

    // Unbound, unmaterialized, unknown and default names are skipped.
    ctx.delete_textures(&[0, names[1], 1234]);
    assert_eq!(ctx.get_error(), None);

    // The deleted name is recycled.
    assert_eq!(ctx.gen_textures(1), vec![names[0]]);
}

#[test]
fn state_is_kept_in_draw() {
    let mut ctx = context();
    let names = ctx.gen_textures(1);

    ctx.begin(GL_TRIANGLES);
    ctx.bind_texture(GL_TEXTURE_2D, names[0]);
    assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));
    assert!(ctx.active_texture_unit().is_bound(ctx.default_texture_2d()));

    assert!(ctx.gen_textures(1).is_empty());
    assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));

    ctx.delete_textures(&names);
    assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));

    assert!(!ctx.is_texture(names[0]));
    assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));

    // Vertex attributes are fine.
    ctx.tex_coord(0.0, 1.0, 0.0, 1.0);
    ctx.multi_tex_coord(GL_TEXTURE1, 1.0, 0.0, 0.0, 1.0);
    assert_eq!(ctx.get_error(), None);
    ctx.end();

    ctx.bind_texture(GL_TEXTURE_2D, names[0]);
    assert_eq!(ctx.get_error(), None);
}
