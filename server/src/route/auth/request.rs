use serde::Deserialize;

use application::transfer::{LoginDto, RegisterDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

pub struct Transformer;

impl Intake<RegisterRequest> for Transformer {
    type To = RegisterDto;
    fn emit(&self, input: RegisterRequest) -> Self::To {
        RegisterDto {
            name: input.username,
            password: input.password,
            confirm_password: input.confirm_password,
        }
    }
}

impl Intake<LoginRequest> for Transformer {
    type To = LoginDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        LoginDto {
            name: input.username,
            password: input.password,
        }
    }
}
