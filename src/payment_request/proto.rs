//! Payment protocol wire messages
//!
//! Field numbers and defaults follow the `paymentrequest.proto` schema.
//! Required fields are declared optional here so their absence is visible to
//! the validator instead of silently defaulting.

/// One requested output
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Output {
    #[prost(uint64, optional, tag = "1", default = "0")]
    pub amount: ::core::option::Option<u64>,
    /// Required
    #[prost(bytes = "vec", optional, tag = "2")]
    pub script: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PaymentDetails {
    #[prost(string, optional, tag = "1", default = "main")]
    pub network: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "2")]
    pub outputs: ::prost::alloc::vec::Vec<Output>,
    /// Required
    #[prost(uint64, optional, tag = "3")]
    pub time: ::core::option::Option<u64>,
    #[prost(uint64, optional, tag = "4")]
    pub expires: ::core::option::Option<u64>,
    #[prost(string, optional, tag = "5")]
    pub memo: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "6")]
    pub payment_url: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub merchant_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PaymentRequest {
    #[prost(uint32, optional, tag = "1", default = "1")]
    pub payment_details_version: ::core::option::Option<u32>,
    #[prost(string, optional, tag = "2", default = "none")]
    pub pki_type: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub pki_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    /// Required
    #[prost(bytes = "vec", optional, tag = "4")]
    pub serialized_payment_details: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub signature: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}
