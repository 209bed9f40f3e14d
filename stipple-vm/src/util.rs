//! Miscellaneous utilities

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    //! Helpers for assembling and running small programs against in-memory
    //! I/O channels.

    use crate::interpreter::Interpreter;
    use crate::prelude::*;

    use std::io::Cursor;

    /// Interpreter over in-memory channels.
    pub type TestInterpreter = Interpreter<Cursor<Vec<u8>>, Vec<u8>>;

    /// Fresh VM whose input channel is preloaded with `input`.
    pub fn vm_with_input(input: &str) -> TestInterpreter {
        Interpreter::with_io(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// Fresh VM with `program` assembled and loaded, and empty input.
    pub fn vm_with_program(program: &[Instruction]) -> TestInterpreter {
        let mut vm = vm_with_input("");
        vm.load_program(&assemble(program)).expect("program too large");
        vm
    }

    /// Assemble, load and run `program`, expecting a clean halt.
    pub fn run_program(program: &[Instruction]) -> TestInterpreter {
        let mut vm = vm_with_program(program);
        vm.run().expect("program faulted");
        vm
    }

    /// Everything the program printed so far.
    pub fn captured_output(vm: &TestInterpreter) -> String {
        String::from_utf8(vm.output().clone()).expect("program printed invalid utf-8")
    }
}
