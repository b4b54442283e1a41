pub mod registration_handler;

pub use registration_handler::{
    __path_register_student, __path_root, register_student, root,
};
