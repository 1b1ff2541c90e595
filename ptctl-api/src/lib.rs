//! ptctl gRPC API
//!
//! This crate defines the wire protocol spoken to the hypervisor management
//! service. The protobuf definitions are in `proto/ptctl.proto` and
//! code-generated via `tonic-build`.

// Include the generated code
pub mod ptctl {
    pub mod v1 {
        tonic::include_proto!("ptctl.v1");
    }
}
