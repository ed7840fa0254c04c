//! A stack of text buffers used to reorder emitted assembly.
//!
//! Most code generation just appends to the current top buffer in the
//! order it is produced. Right-associative assignment chains
//! (`a = b = c = expr;`) need the opposite: the initializer must be
//! evaluated exactly once before any of the stores, but the stores have to
//! land in the assembly in the reverse of the order their targets were
//! parsed. Pushing a fresh buffer before recursing into the right-hand
//! side, then splicing the popped buffer back into the parent once the
//! recursion returns, gets the ordering right without emitting twice.

pub struct CodeBuffer {
    stack: Vec<String>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self { stack: vec![String::new()] }
    }

    pub fn push(&mut self) {
        self.stack.push(String::new());
    }

    pub fn pop(&mut self) -> String {
        self.stack.pop().expect("code buffer stack underflow")
    }

    /// Append a line of assembly to the current top buffer.
    pub fn emit(&mut self, line: &str) {
        let top = self.stack.last_mut().expect("empty code buffer stack");
        top.push_str(line);
        top.push('\n');
    }

    /// Append a label definition line.
    pub fn emit_label(&mut self, label: &str) {
        self.emit(&format!("{label}:"));
    }

    /// Append raw, already-terminated assembly text (e.g. a popped buffer).
    pub fn emit_raw(&mut self, text: &str) {
        let top = self.stack.last_mut().expect("empty code buffer stack");
        top.push_str(text);
    }

    /// Consume the buffer stack, returning the single remaining buffer.
    pub fn finish(mut self) -> String {
        assert_eq!(self.stack.len(), 1, "unbalanced code buffer stack");
        self.stack.pop().unwrap()
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_splices_back_in_order() {
        let mut buf = CodeBuffer::new();
        buf.emit("mov.reg.i32 r0 7");
        buf.push();
        buf.emit("mov.mem.reg.i32 [sp+0] r0");
        let inner = buf.pop();
        buf.emit_raw(&inner);
        buf.emit("mov.mem.reg.i32 [sp+4] r0");
        assert_eq!(
            buf.finish(),
            "mov.reg.i32 r0 7\nmov.mem.reg.i32 [sp+0] r0\nmov.mem.reg.i32 [sp+4] r0\n"
        );
    }
}
