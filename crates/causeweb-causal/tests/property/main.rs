mod propagation_properties;
