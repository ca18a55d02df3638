//! Call lists. While a list is being compiled the recordable entry points are
//! appended to it instead of (or in addition to) being executed, and
//! `call_list` replays them later through the same entry points.

use std::collections::HashMap;

use crate::device::Device;
use crate::enums::*;
use crate::errors::*;
use crate::utils::NameAllocator;

use super::Context;

/// The maximum depth of nested `call_list`s.
pub const MAX_LIST_NESTING: usize = 64;

/// A recorded call of a recordable entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Enable(GLenum),
    Disable(GLenum),
    CallList(GLuint),

    CopyTexImage2D(GLenum, GLint, GLenum, GLint, GLint, GLsizei, GLsizei, GLint),
    CopyTexSubImage2D(GLenum, GLint, GLint, GLint, GLint, GLint, GLsizei, GLsizei),

    MultiTexCoord(GLenum, [GLfloat; 4]),
    TexCoord([GLfloat; 4]),

    TexEnv(GLenum, GLenum, GLfloat),
    TexEnvfv(GLenum, GLenum, [GLfloat; 4]),
    TexGen(GLenum, GLenum, GLint),
    TexGenfv(GLenum, GLenum, [GLfloat; 4]),
    TexParameter(GLenum, GLenum, GLfloat),
    TexParameterfv(GLenum, GLenum, [GLfloat; 4]),
}

#[derive(Debug)]
struct Recording {
    name: GLuint,
    mode: GLenum,
    commands: Vec<Command>,
}

#[derive(Default)]
pub(super) struct CallLists {
    names: NameAllocator,
    lists: HashMap<GLuint, Vec<Command>>,
    recording: Option<Recording>,
    replay_depth: usize,
}

impl<D: Device> Context<D> {
    /// Appends `command` to the list being compiled. Returns true if the caller
    /// must not execute it now.
    pub(super) fn record(&mut self, command: Command) -> bool {
        // Replayed commands are covered by the recorded `CallList`.
        if self.lists.replay_depth > 0 {
            return false;
        }

        match self.lists.recording {
            Some(ref mut recording) => {
                recording.commands.push(command);
                recording.mode == GL_COMPILE
            }
            None => false,
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Enable(cap) => self.enable(cap),
            Command::Disable(cap) => self.disable(cap),
            Command::CallList(list) => self.call_list(list),
            Command::CopyTexImage2D(target, level, internal_format, x, y, w, h, border) => {
                self.copy_tex_image_2d(target, level, internal_format, x, y, w, h, border)
            }
            Command::CopyTexSubImage2D(target, level, xoffset, yoffset, x, y, w, h) => {
                self.copy_tex_sub_image_2d(target, level, xoffset, yoffset, x, y, w, h)
            }
            Command::MultiTexCoord(target, v) => {
                self.multi_tex_coord(target, v[0], v[1], v[2], v[3])
            }
            Command::TexCoord(v) => self.tex_coord(v[0], v[1], v[2], v[3]),
            Command::TexEnv(target, pname, param) => self.tex_env(target, pname, param),
            Command::TexEnvfv(target, pname, params) => self.tex_envfv(target, pname, params),
            Command::TexGen(coord, pname, param) => self.tex_gen(coord, pname, param),
            Command::TexGenfv(coord, pname, params) => self.tex_genfv(coord, pname, params),
            Command::TexParameter(target, pname, param) => {
                self.tex_parameter(target, pname, param)
            }
            Command::TexParameterfv(target, pname, params) => {
                self.tex_parameterfv(target, pname, params)
            }
        }
    }
}

impl<D: Device> Context<D> {
    /// Reserves `range` consecutive list names and returns the first one, or 0
    /// if nothing has been reserved.
    pub fn gen_lists(&mut self, range: GLsizei) -> GLuint {
        let result = self.gen_lists_internal(range);
        self.latch(result).unwrap_or(0)
    }

    fn gen_lists_internal(&mut self, range: GLsizei) -> Result<GLuint> {
        fail_if!(range < 0, InvalidValue);
        fail_if!(self.in_draw_state, InvalidOperation);

        let first = match self.lists.names.allocate_range(range as usize) {
            Some(v) => v,
            None => return Ok(0),
        };

        for name in first..first + range as GLuint {
            self.lists.lists.insert(name, Vec::new());
        }

        Ok(first)
    }

    /// Starts compiling the list `list`. With `GL_COMPILE_AND_EXECUTE` the
    /// recorded commands are executed as well.
    pub fn new_list(&mut self, list: GLuint, mode: GLenum) {
        let result = self.new_list_internal(list, mode);
        self.latch(result);
    }

    fn new_list_internal(&mut self, list: GLuint, mode: GLenum) -> Result<()> {
        fail_if!(list == 0, InvalidValue);
        fail_if!(mode != GL_COMPILE && mode != GL_COMPILE_AND_EXECUTE, InvalidEnum);
        fail_if!(self.in_draw_state, InvalidOperation);
        fail_if!(self.lists.recording.is_some(), InvalidOperation);

        self.lists.recording = Some(Recording {
            name: list,
            mode,
            commands: Vec::new(),
        });

        Ok(())
    }

    /// Finishes the list started by `new_list`, replacing its previous content.
    pub fn end_list(&mut self) {
        let result = self.end_list_internal();
        self.latch(result);
    }

    fn end_list_internal(&mut self) -> Result<()> {
        fail_if!(self.in_draw_state, InvalidOperation);

        let recording = self.lists.recording.take().ok_or(Error::InvalidOperation)?;
        debug!(
            "Compiled list {} with {} commands.",
            recording.name,
            recording.commands.len()
        );

        self.lists.names.reserve(recording.name);
        self.lists.lists.insert(recording.name, recording.commands);
        Ok(())
    }

    /// Replays the commands of `list`. Unknown lists are ignored.
    pub fn call_list(&mut self, list: GLuint) {
        if self.record(Command::CallList(list)) {
            return;
        }

        if self.lists.replay_depth >= MAX_LIST_NESTING {
            warn!("Call list {} exceeds the maximum nesting depth.", list);
            return;
        }

        let commands = match self.lists.lists.get(&list) {
            Some(v) => v.clone(),
            None => return,
        };

        self.lists.replay_depth += 1;
        for command in commands {
            self.execute(command);
        }
        self.lists.replay_depth -= 1;
    }

    /// Deletes the lists `list..list + range`.
    pub fn delete_lists(&mut self, list: GLuint, range: GLsizei) {
        let result = self.delete_lists_internal(list, range);
        self.latch(result);
    }

    fn delete_lists_internal(&mut self, list: GLuint, range: GLsizei) -> Result<()> {
        fail_if!(range < 0, InvalidValue);
        fail_if!(self.in_draw_state, InvalidOperation);

        let end = list.saturating_add(range as GLuint);
        for name in list..end {
            if self.lists.lists.remove(&name).is_some() {
                self.lists.names.free(name);
            }
        }

        Ok(())
    }

    pub fn is_list(&mut self, list: GLuint) -> bool {
        if self.in_draw_state {
            self.latch::<()>(Err(Error::InvalidOperation));
            return false;
        }

        self.lists.lists.contains_key(&list)
    }

    /// Returns true while a list is being compiled.
    #[inline]
    pub fn is_compiling_list(&self) -> bool {
        self.lists.recording.is_some()
    }
}

#[cfg(test)]
mod test {
    use crate::context::Context;
    use crate::device::headless::{HeadlessDevice, HeadlessParams};
    use crate::enums::*;
    use crate::errors::Error;

    fn context() -> Context<HeadlessDevice> {
        Context::new(HeadlessDevice::new(HeadlessParams::default()))
    }

    #[test]
    fn compile() {
        let mut ctx = context();

        let list = ctx.gen_lists(2);
        assert_eq!(list, 1);
        assert!(ctx.is_list(1) && ctx.is_list(2) && !ctx.is_list(3));

        ctx.new_list(list, GL_COMPILE);
        assert!(ctx.is_compiling_list());
        ctx.enable(GL_TEXTURE_2D);
        ctx.end_list();

        assert!(!ctx.is_enabled(GL_TEXTURE_2D));
        ctx.call_list(list);
        assert!(ctx.is_enabled(GL_TEXTURE_2D));
        assert_eq!(ctx.get_error(), None);
    }

    #[test]
    fn compile_and_execute() {
        let mut ctx = context();

        ctx.new_list(7, GL_COMPILE_AND_EXECUTE);
        ctx.enable(GL_TEXTURE_GEN_S);
        ctx.end_list();
        assert!(ctx.is_enabled(GL_TEXTURE_GEN_S));
        assert!(ctx.is_list(7));

        ctx.disable(GL_TEXTURE_GEN_S);
        ctx.call_list(7);
        assert!(ctx.is_enabled(GL_TEXTURE_GEN_S));
    }

    #[test]
    fn nested_lists() {
        let mut ctx = context();

        ctx.new_list(1, GL_COMPILE);
        ctx.enable(GL_TEXTURE_2D);
        ctx.end_list();

        ctx.new_list(2, GL_COMPILE_AND_EXECUTE);
        ctx.call_list(1);
        ctx.end_list();
        assert!(ctx.is_enabled(GL_TEXTURE_2D));

        ctx.disable(GL_TEXTURE_2D);
        ctx.call_list(2);
        assert!(ctx.is_enabled(GL_TEXTURE_2D));

        // Self referencing lists stop at the nesting limit.
        ctx.new_list(3, GL_COMPILE);
        ctx.call_list(3);
        ctx.end_list();
        ctx.call_list(3);
        assert_eq!(ctx.get_error(), None);
    }

    #[test]
    fn errors() {
        let mut ctx = context();

        assert_eq!(ctx.gen_lists(-1), 0);
        assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
        assert_eq!(ctx.gen_lists(0), 0);
        assert_eq!(ctx.get_error(), None);

        ctx.new_list(0, GL_COMPILE);
        assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
        ctx.new_list(1, GL_TEXTURE_2D);
        assert_eq!(ctx.get_error(), Some(Error::InvalidEnum));
        ctx.end_list();
        assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));

        ctx.new_list(1, GL_COMPILE);
        ctx.new_list(2, GL_COMPILE);
        assert_eq!(ctx.get_error(), Some(Error::InvalidOperation));
        ctx.end_list();

        ctx.delete_lists(1, -1);
        assert_eq!(ctx.get_error(), Some(Error::InvalidValue));
        ctx.delete_lists(1, 1);
        assert!(!ctx.is_list(1));

        // Unknown lists are ignored.
        ctx.call_list(42);
        assert_eq!(ctx.get_error(), None);
    }
}
