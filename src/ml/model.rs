use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use burn::{
    module::Ignored,
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation,
};
use serde::{Deserialize, Serialize};

/// Per-layer activation function, applied element-wise after
/// each Linear (Softmax over the class dimension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
    Softplus,
}

impl Activation {
    pub fn apply<B: Backend>(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            Activation::Linear => x,
            Activation::Relu => activation::relu(x),
            Activation::Sigmoid => activation::sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::Softmax => activation::softmax(x, 1),
            Activation::Softplus => activation::softplus(x, 1.0),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Activation::Linear => "linear",
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Softmax => "softmax",
            Activation::Softplus => "softplus",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Activation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Activation::Linear),
            "relu" => Ok(Activation::Relu),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "softmax" => Ok(Activation::Softmax),
            "softplus" => Ok(Activation::Softplus),
            other => Err(anyhow!(
                "unknown activation \"{other}\" (expected one of: \
                 linear, relu, sigmoid, tanh, softmax, softplus)"
            )),
        }
    }
}

/// Architecture of the classifier.
///
/// `layer_sizes` includes the input layer, e.g. [4, 8, 3] is
/// 4 features → one hidden layer of 8 → 3 classes.
/// `activations` has one entry per non-input layer.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    pub layer_sizes: Vec<usize>,
    pub activations: Vec<Activation>,
}

impl ClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Classifier<B> {
        let layers = self
            .layer_sizes
            .windows(2)
            .map(|pair| LinearConfig::new(pair[0], pair[1]).init(device))
            .collect();
        Classifier {
            layers,
            activations: Ignored(self.activations.clone()),
        }
    }
}

/// The feed-forward classifier: one Linear per consecutive
/// layer-size pair, each followed by its activation.
#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    pub layers: Vec<Linear<B>>,
    pub activations: Ignored<Vec<Activation>>,
}

impl<B: Backend> Classifier<B> {
    /// Full forward pass, activations included.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = input;
        for (linear, act) in self.layers.iter().zip(self.activations.0.iter()) {
            x = act.apply(linear.forward(x));
        }
        x
    }

    /// Forward pass that yields logits for the loss:
    /// a trailing Softmax is skipped because the
    /// cross-entropy loss applies log-softmax itself.
    /// Argmax over logits equals argmax over softmax, so
    /// predictions may also rank these directly.
    pub fn forward_logits(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let last = self.layers.len().saturating_sub(1);
        let mut x = input;
        for (i, (linear, act)) in self
            .layers
            .iter()
            .zip(self.activations.0.iter())
            .enumerate()
        {
            x = linear.forward(x);
            if i == last && *act == Activation::Softmax {
                continue;
            }
            x = act.apply(x);
        }
        x
    }

    /// Node counts per layer, input layer included —
    /// read back from the weight shapes.
    pub fn shape(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.layers.len() + 1);
        for (i, linear) in self.layers.iter().enumerate() {
            let [d_input, d_output] = linear.weight.val().dims();
            if i == 0 {
                sizes.push(d_input);
            }
            sizes.push(d_output);
        }
        sizes
    }
}
